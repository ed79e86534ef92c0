use anyhow::Result;

/// Something that can start a song on the player's device
#[cfg_attr(test, mockall::automock)]
pub trait Playback {
    fn play(&self, url: &str) -> Result<()>;
}

/// Playback for sessions without a remote player: shows the link instead
pub struct ConsolePlayback;

impl Playback for ConsolePlayback {
    fn play(&self, url: &str) -> Result<()> {
        println!("Open the song here: {url}");
        Ok(())
    }
}
