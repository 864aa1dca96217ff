pub mod bank;
pub mod leaderboard;
pub mod subjects;

use rust_embed::Embed;

#[derive(Embed)]
#[folder = "assets/"]
struct ContentAssets;

/// Raw UTF-8 contents of a bundled asset, or `None` if it is missing.
fn asset_text(name: &str) -> Option<String> {
    let file = ContentAssets::get(name)?;
    std::str::from_utf8(file.data.as_ref()).ok().map(str::to_string)
}
