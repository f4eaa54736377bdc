use clap::Parser;
use dotenvy::dotenv;
use vibescope::{
    client::SpotifyClientBuilder,
    config::Credentials,
    model::{
        id::{Id, PlaylistId},
        track::identified_tracks,
    },
    report::pair_tracks_with_features,
    Result,
};

/// List a playlist's tracks and print their audio features as JSON records.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Playlist URL, URI or bare ID
    playlist: String,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    if let Err(err) = run(Args::parse()).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let playlist = Id::<PlaylistId>::from_input(args.playlist.as_str())?;
    println!("Playlist ID: {playlist}");

    let credentials = Credentials::from_env()?;
    let client = SpotifyClientBuilder::new(credentials.client_id)
        .client_secret(credentials.client_secret)
        .build()
        .await?;

    let items = client.playlist_items(playlist).await?;

    for (idx, item) in items.iter().enumerate() {
        if let Some(track) = item.track() {
            println!("Track {}: {}", idx + 1, track.name());
        }
    }

    let tracks = identified_tracks(&items);
    if tracks.is_empty() {
        println!("No valid track IDs found in the playlist.");
        return Ok(());
    }

    let features = client
        .audio_features(tracks.iter().map(|track| track.id.as_borrowed()))
        .await?;
    let records = pair_tracks_with_features(&tracks, features)?;

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
