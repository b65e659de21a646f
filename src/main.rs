use anyhow::Context;

use tunebridge::cli::{prompts, MigrationConfig};
use tunebridge::modules::destination::SpotifyClient;
use tunebridge::modules::migration::{MigrationRequest, MigrationService};
use tunebridge::modules::source::YouTubeClient;
use tunebridge::shared::utils::logger::init_logger;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();
    init_logger();

    if let Err(err) = run().await {
        log::error!("Migration failed: {:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = MigrationConfig::from_env();

    let youtube_key = prompts::read_input(
        "YOUTUBE_API_KEY",
        &[
            "A YouTube API key is needed to run this program.",
            "If you don't know how to get one, follow this link: \
             https://rapidapi.com/blog/how-to-get-youtube-api-key/",
        ],
        "Please enter your YouTube API key:",
    )?;
    let source_playlist = prompts::read_input(
        "YOUTUBE_PLAYLIST_ID",
        &[],
        "Please enter the YouTube playlist ID - if the link to the playlist is \
         https://www.youtube.com/playlist?list=ABCD1234, the playlist ID is ABCD1234:",
    )?;
    let spotify_token = prompts::read_input(
        "SPOTIFY_TOKEN",
        &[
            "You will need a Spotify developer OAuth token.",
            "Follow these directions to create an app on the Spotify Developer Dashboard: \
             https://developer.spotify.com/documentation/general/guides/app-settings/#register-your-app",
            "Once you've created your app, go to Console -> Playlists -> Add Items and click \
             Get Token. You will need to grant playlist-modify-public and \
             playlist-modify-private to this token.",
        ],
        "Paste the token below:",
    )?;
    let destination_playlist = prompts::read_input(
        "SPOTIFY_PLAYLIST_ID",
        &[],
        "Please enter the Spotify playlist ID to add songs to:",
    )?;

    let source = YouTubeClient::new(youtube_key, config.request_timeout_secs)
        .context("Failed to build the YouTube client")?;
    let destination = SpotifyClient::new(
        spotify_token,
        config.request_timeout_secs,
        config.requests_per_second,
    )
    .context("Failed to build the Spotify client")?;

    let service = MigrationService::new(source, destination, config.batch_size, config.retry);
    let request = MigrationRequest {
        source_playlist,
        destination_playlist,
    };

    let report = service.run(&request).await?;
    println!("{}", report);
    println!("Done");
    Ok(())
}
