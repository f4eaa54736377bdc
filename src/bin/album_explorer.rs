use clap::Parser;
use dotenvy::dotenv;
use vibescope::{
    client::SpotifyClientBuilder, config::Credentials, report::TrackFeatureRecord,
    selection::prompt_selection, Result,
};

/// Browse an artist's albums interactively and print audio features for a chosen track.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Artist name to search for
    artist: String,
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
    let credentials = Credentials::from_env()?;
    let client = SpotifyClientBuilder::new(credentials.client_id)
        .client_secret(credentials.client_secret)
        .build()
        .await?;

    let artists = client.search_artists(&args.artist, 1).await?;
    let Some(artist) = artists.into_iter().next() else {
        println!("No artist matched \"{}\".", args.artist);
        return Ok(());
    };

    let albums = client.artist_albums(artist.id().as_borrowed()).await?;
    if albums.is_empty() {
        println!("No albums found for {}.", artist.name());
        return Ok(());
    }

    println!("Albums by {}:", artist.name());
    for (idx, album) in albums.iter().enumerate() {
        match album.release_date() {
            Some(date) => println!("{}. {} ({})", idx + 1, album.name(), date),
            None => println!("{}. {}", idx + 1, album.name()),
        }
    }

    let selection = prompt_selection(
        "Enter the number of the album you want to explore: ",
        albums.len(),
    )?;
    let album = &albums[selection];

    let tracks = client.album_tracks(album.id().as_borrowed()).await?;
    if tracks.is_empty() {
        println!("The album '{}' has no tracks.", album.name());
        return Ok(());
    }

    println!("Tracks in the album '{}':", album.name());
    for (idx, track) in tracks.iter().enumerate() {
        println!("{}. {}", idx + 1, track.name());
    }

    let selection = prompt_selection(
        "Enter the number of the track you want to get audio features for: ",
        tracks.len(),
    )?;
    let track = &tracks[selection];

    let features = client.audio_features_for_track(track.id().as_borrowed()).await?;
    println!("{}", TrackFeatureRecord::new(track.name(), Some(features)));

    Ok(())
}
