//! Sheet rasterizer and deck export.
//!
//! Paints the card grid into an RGBA `Pixmap`. Portrait payloads stay opaque
//! to the core (decoding them is the presentation collaborator's job), so a
//! portrait face is painted as a deterministic tone derived from the image
//! digest; pip and loading faces are painted procedurally.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::cards::Card;
use crate::error::{Error, Result};
use crate::render::layout::{layout_sheet, Rect};
use crate::render::{CardFace, Pixmap};

const SHEET_BG: (u8, u8, u8, u8) = (17, 24, 39, 255);
const CARD_BG: (u8, u8, u8, u8) = (250, 250, 250, 255);
const FACE_BG: (u8, u8, u8, u8) = (255, 255, 255, 255);
const LOADING_BG: (u8, u8, u8, u8) = (229, 231, 235, 255);
const SEAM: (u8, u8, u8, u8) = (230, 230, 230, 255);

const RED: (u8, u8, u8, u8) = (220, 38, 38, 255);
const BLACK: (u8, u8, u8, u8) = (17, 17, 17, 255);
const RED_FLIPPED: (u8, u8, u8, u8) = (153, 27, 27, 255);
const BLACK_FLIPPED: (u8, u8, u8, u8) = (55, 55, 55, 255);

const PIP_SIZE: u32 = 10;

/// Rasterize all cards onto one sheet.
pub fn rasterize_sheet(cards: &[Card]) -> Pixmap {
    let layout = layout_sheet(cards.len());
    let mut pm = Pixmap::new(layout.width, layout.height);
    pm.fill_rect(0, 0, layout.width, layout.height, SHEET_BG);

    for (card, slot) in cards.iter().zip(&layout.slots) {
        paint_card(&mut pm, card, *slot);
    }
    pm
}

fn paint_card(pm: &mut Pixmap, card: &Card, slot: Rect) {
    pm.fill_rect(slot.x, slot.y, slot.width, slot.height, CARD_BG);

    // Corner indices: top-left upright, bottom-right rotated.
    let suit_color = if card.id.suit.is_red() { RED } else { BLACK };
    pm.fill_rect(slot.x + 5, slot.y + 5, 8, 12, suit_color);
    pm.fill_rect(
        slot.x + slot.width as i32 - 13,
        slot.y + slot.height as i32 - 17,
        8,
        12,
        suit_color,
    );

    // Inner face area, inset past the corner indices
    let face = Rect {
        x: slot.x + 16,
        y: slot.y + 22,
        width: slot.width - 32,
        height: slot.height - 44,
    };

    match CardFace::of(card) {
        CardFace::Loading => {
            pm.fill_rect(face.x, face.y, face.width, face.height, LOADING_BG);
        }
        CardFace::Pips(slots) => {
            pm.fill_rect(face.x, face.y, face.width, face.height, FACE_BG);
            let cell_w = face.width / 3;
            let cell_h = face.height / 7;
            for pip in slots {
                let (col, row) = pip.grid();
                let cx = face.x + (col * cell_w + cell_w / 2) as i32;
                let cy = face.y + (row * cell_h + cell_h / 2) as i32;
                let color = match (card.id.suit.is_red(), pip.is_flipped()) {
                    (true, false) => RED,
                    (true, true) => RED_FLIPPED,
                    (false, false) => BLACK,
                    (false, true) => BLACK_FLIPPED,
                };
                pm.fill_rect(
                    cx - (PIP_SIZE / 2) as i32,
                    cy - (PIP_SIZE / 2) as i32,
                    PIP_SIZE,
                    PIP_SIZE,
                    color,
                );
            }
        }
        CardFace::Portrait { image } => {
            // The payload is opaque here; a digest-derived tone stands in for
            // the decoded portrait. Top and bottom halves mirror each other.
            let digest = Sha256::digest(image.as_bytes());
            let tone = (digest[0], digest[1], digest[2], 255);
            let half = face.height / 2;
            pm.fill_rect(face.x, face.y, face.width, half, tone);
            pm.fill_rect(face.x, face.y + half as i32, face.width, face.height - half, tone);
            pm.fill_rect(face.x, face.y + half as i32 - 1, face.width, 2, SEAM);
        }
    }
}

/// Encode a pixmap as binary PPM (P6), dropping alpha.
pub fn to_ppm(pm: &Pixmap) -> Vec<u8> {
    let mut out = format!("P6\n{} {}\n255\n", pm.width, pm.height).into_bytes();
    out.reserve((pm.width * pm.height * 3) as usize);
    for px in pm.pixels.chunks_exact(4) {
        out.extend_from_slice(&px[..3]);
    }
    out
}

/// Write the deck sheet to `path`. Only a complete 52-card deck may be
/// exported; failures leave the deck untouched (this function never mutates
/// it).
pub fn export_deck(cards: &[Card], path: &Path) -> Result<()> {
    if cards.len() != 52 {
        return Err(Error::ExportError(format!(
            "deck must hold exactly 52 cards, found {}",
            cards.len()
        )));
    }

    let sheet = rasterize_sheet(cards);
    std::fs::write(path, to_ppm(&sheet))
        .map_err(|e| Error::ExportError(format!("could not write {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{full_deck, Artwork, CardId, Rank, Suit};

    fn sample_deck() -> Vec<Card> {
        full_deck()
            .into_iter()
            .map(|id| {
                if id.rank.is_face() {
                    Card { id, artwork: Artwork::Portrait(format!("data:{}", id)) }
                } else {
                    Card::pips(id)
                }
            })
            .collect()
    }

    #[test]
    fn sheet_matches_layout_dimensions() {
        let pm = rasterize_sheet(&sample_deck());
        let layout = layout_sheet(52);
        assert_eq!(pm.width, layout.width);
        assert_eq!(pm.height, layout.height);
        assert_eq!(pm.pixels.len(), (pm.width * pm.height * 4) as usize);
    }

    #[test]
    fn rasterization_is_deterministic() {
        let deck = sample_deck();
        assert_eq!(rasterize_sheet(&deck).pixels, rasterize_sheet(&deck).pixels);
    }

    #[test]
    fn distinct_portraits_paint_distinct_tones() {
        let id = CardId::new(Rank::Ace, Suit::Spades);
        let a = rasterize_sheet(&[Card { id, artwork: Artwork::Portrait("data:a".into()) }]);
        let b = rasterize_sheet(&[Card { id, artwork: Artwork::Portrait("data:b".into()) }]);
        assert_ne!(a.pixels, b.pixels);
    }

    #[test]
    fn ppm_header_and_size() {
        let pm = Pixmap::new(3, 2);
        let ppm = to_ppm(&pm);
        assert!(ppm.starts_with(b"P6\n3 2\n255\n"));
        assert_eq!(ppm.len(), b"P6\n3 2\n255\n".len() + 3 * 2 * 3);
    }

    #[test]
    fn export_rejects_incomplete_decks() {
        let three: Vec<Card> = sample_deck().into_iter().take(3).collect();
        let err = export_deck(&three, Path::new("/tmp/never-written.ppm")).unwrap_err();
        assert!(matches!(err, Error::ExportError(_)));
    }

    #[test]
    fn export_writes_a_sheet_file() {
        let path = std::env::temp_dir().join(format!("catdeck-sheet-{}.ppm", std::process::id()));
        export_deck(&sample_deck(), &path).expect("export");
        let written = std::fs::read(&path).expect("read back");
        assert!(written.starts_with(b"P6\n"));
        let _ = std::fs::remove_file(&path);
    }
}
