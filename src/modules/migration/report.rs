use std::fmt;

/// Counts for one migration run. Every fetched title ends up in exactly one
/// bucket: matched (then written or unwritten), not found, unparseable, or
/// skipped.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MigrationReport {
    pub fetched: usize,
    pub matched: usize,
    pub not_found: usize,
    pub unparseable: usize,
    pub skipped: usize,
    pub written: usize,
    pub unwritten: usize,
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Migration summary:")?;
        writeln!(f, "  titles fetched:  {}", self.fetched)?;
        writeln!(f, "  matched:         {}", self.matched)?;
        writeln!(f, "  not found:       {}", self.not_found)?;
        writeln!(f, "  unparseable:     {}", self.unparseable)?;
        writeln!(f, "  skipped (error): {}", self.skipped)?;
        writeln!(f, "  written:         {}", self.written)?;
        write!(f, "  unwritten:       {}", self.unwritten)
    }
}
