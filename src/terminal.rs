//! ANSI terminal output of paint instructions using crossterm
//!
//! Terminals have one font, so only colour, weight, slant and underline
//! survive; sizes, families and borders are dropped. Text without a
//! background of its own gets the theme's viewer background.

use std::io::Write;

use crossterm::{
    queue,
    style::{self, Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
};

use crate::error::Result;
use crate::render::PaintInstruction;
use crate::style::{Color, StyleDescriptor};

fn term_color(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Writes styled text to any byte sink
pub struct Painter<W: Write> {
    out: W,
    /// Emit escape sequences
    color: bool,
    /// Background for text whose style has none
    background: Option<Color>,
}

impl<W: Write> Painter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            color: true,
            background: None,
        }
    }

    /// Builder: write the bare text without escapes
    pub fn plain(mut self) -> Self {
        self.color = false;
        self
    }

    /// Builder: paint unstyled backgrounds with `color`
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Write `text` styled by `instructions`
    ///
    /// Attributes are reset before every newline so backgrounds do not
    /// bleed to the right margin.
    pub fn paint(&mut self, text: &str, instructions: &[PaintInstruction]) -> Result<()> {
        for instruction in instructions {
            let segment = instruction.text(text);
            if !self.color {
                queue!(self.out, Print(segment))?;
                continue;
            }

            for (i, piece) in segment.split('\n').enumerate() {
                if i > 0 {
                    queue!(self.out, Print("\n"))?;
                }
                if piece.is_empty() {
                    continue;
                }
                self.set_style(&instruction.style)?;
                queue!(self.out, Print(piece))?;
                self.reset()?;
            }
        }
        self.flush()
    }

    fn set_style(&mut self, style: &StyleDescriptor) -> Result<()> {
        queue!(self.out, SetForegroundColor(term_color(style.foreground)))?;
        if let Some(background) = style.background.or(self.background) {
            queue!(self.out, SetBackgroundColor(term_color(background)))?;
        }
        if style.is_bold() {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if style.is_italic() {
            queue!(self.out, SetAttribute(Attribute::Italic))?;
        }
        if style.underline {
            queue!(self.out, SetAttribute(Attribute::Underlined))?;
        }
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
        Ok(())
    }

    /// Flush output buffer
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
