use anyhow::Error as Anyhow;
use clap::Subcommand;
use derive_more::From;

mod check;
mod play;

#[derive(From, Subcommand)]
pub enum Applet {
    Check(check::Check),
    Play(play::Play),
}

impl Default for Applet {
    fn default() -> Self {
        play::Play::default().into()
    }
}

impl Applet {
    pub fn execute(self) -> Result<(), Anyhow> {
        match self {
            Applet::Check(a) => a.execute(),
            Applet::Play(a) => a.execute(),
        }
    }
}
