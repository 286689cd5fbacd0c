//! Sheet layout: where each card lands on the exported raster.

/// Card width in pixels (2:3 aspect)
pub const CARD_WIDTH: u32 = 120;
pub const CARD_HEIGHT: u32 = 180;

/// Cards per row; 13 puts one suit on each row of a full deck
pub const SHEET_COLUMNS: usize = 13;

const GUTTER: u32 = 12;
const MARGIN: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Sheet dimensions plus one slot rect per card, in deck order
#[derive(Debug, Clone)]
pub struct SheetLayout {
    pub width: u32,
    pub height: u32,
    pub slots: Vec<Rect>,
}

/// Lay out `n` cards left to right, top to bottom.
pub fn layout_sheet(n: usize) -> SheetLayout {
    let columns = n.min(SHEET_COLUMNS).max(1);
    let rows = n.div_ceil(columns).max(1);

    let width = MARGIN * 2 + columns as u32 * CARD_WIDTH + (columns as u32 - 1) * GUTTER;
    let height = MARGIN * 2 + rows as u32 * CARD_HEIGHT + (rows as u32 - 1) * GUTTER;

    let mut slots = Vec::with_capacity(n);
    for i in 0..n {
        let col = (i % columns) as u32;
        let row = (i / columns) as u32;
        slots.push(Rect {
            x: (MARGIN + col * (CARD_WIDTH + GUTTER)) as i32,
            y: (MARGIN + row * (CARD_HEIGHT + GUTTER)) as i32,
            width: CARD_WIDTH,
            height: CARD_HEIGHT,
        });
    }

    SheetLayout { width, height, slots }
}
