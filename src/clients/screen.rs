// src/clients/screen.rs
// End-of-round screens for the game client.

use std::io::{self, Write};

use crossterm::{
    execute,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};

use crate::logging::log_error;

pub trait GameScreen {
    fn show_game_over(&mut self);
    fn show_clear(&mut self, score: u32);
}

/// Draws the end-of-round banners on a terminal
pub struct TerminalScreen<W: Write> {
    out: W,
}

impl TerminalScreen<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalScreen<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn banner(&mut self, color: Color, title: &str, lines: &[String]) -> io::Result<()> {
        execute!(
            self.out,
            Print("\n"),
            SetForegroundColor(color),
            SetAttribute(Attribute::Bold),
            Print(format!("  {title}\n")),
            SetAttribute(Attribute::Reset),
            ResetColor,
        )?;
        for line in lines {
            execute!(self.out, Print(format!("  {line}\n")))?;
        }
        self.out.flush()
    }
}

impl<W: Write> GameScreen for TerminalScreen<W> {
    fn show_game_over(&mut self) {
        let lines = [
            "福工大前で降りることができませんでした。".to_string(),
            "スコア: 0点".to_string(),
        ];
        if let Err(e) = self.banner(Color::Red, "GAME OVER", &lines) {
            log_error(&format!("Failed to draw game-over screen: {e}"));
        }
    }

    fn show_clear(&mut self, score: u32) {
        let lines = [
            "福工大前で無事に降りることができました！".to_string(),
            format!("スコア: {score}点"),
        ];
        if let Err(e) = self.banner(Color::Green, "CLEAR", &lines) {
            log_error(&format!("Failed to draw clear screen: {e}"));
        }
    }
}
