//! Presentation contract and sheet export.
//!
//! The rendering rule for a card is deterministic: pip-marked cards get a
//! procedural pip layout keyed by rank, pending cards get a loading
//! affordance, and fetched cards show their portrait split into two halves
//! with the bottom half rotated 180° (the traditional twin-pip face).

pub mod layout;
pub mod pips;
pub mod raster;

use crate::cards::{Artwork, Card};
use pips::PipSlot;

/// What the presentation layer should draw for one card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardFace<'a> {
    /// Procedural pip layout, one mark per slot
    Pips(&'static [PipSlot]),
    /// Fetch still pending: show a loading affordance
    Loading,
    /// A fetched portrait; rendered mirrored about the horizontal center
    Portrait { image: &'a str },
}

impl<'a> CardFace<'a> {
    pub fn of(card: &'a Card) -> Self {
        match &card.artwork {
            Artwork::Pips => CardFace::Pips(pips::pip_slots(card.id.rank)),
            Artwork::Empty => CardFace::Loading,
            Artwork::Portrait(image) => CardFace::Portrait { image },
        }
    }
}

/// An RGBA8 raster buffer
#[derive(Debug, Clone)]
pub struct Pixmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Pixmap {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, pixels: vec![0; (width * height * 4) as usize] }
    }

    /// Fill an axis-aligned rectangle, clipped to the buffer
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, rgba: (u8, u8, u8, u8)) {
        let (r, g, b, a) = rgba;
        for py in y.max(0)..(y + h as i32).min(self.height as i32) {
            for px in x.max(0)..(x + w as i32).min(self.width as i32) {
                let idx = ((py as u32 * self.width + px as u32) * 4) as usize;
                self.pixels[idx] = r;
                self.pixels[idx + 1] = g;
                self.pixels[idx + 2] = b;
                self.pixels[idx + 3] = a;
            }
        }
    }
}
