// Copyright 2025 the Font Preview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal TrueType font assembled in memory.
//!
//! The font has two glyphs: `.notdef`, a solid rectangle, and `space`, which is
//! empty. Only U+0020 is mapped, so every other character renders as the
//! rectangle.

pub(crate) const UNITS_PER_EM: u16 = 1000;
pub(crate) const ASCENDER: i16 = 800;
pub(crate) const DESCENDER: i16 = -200;
pub(crate) const BOX_ADVANCE: u16 = 600;
pub(crate) const SPACE_ADVANCE: u16 = 250;
const BOX_X_MIN: i16 = 50;
const BOX_X_MAX: i16 = 550;

/// Font whose rectangle spans from the baseline to 700 units, below the ascender.
pub(crate) fn box_font() -> Vec<u8> {
    build(700)
}

/// Font whose rectangle rises to 1000 units, above the 800 unit ascender.
pub(crate) fn tall_box_font() -> Vec<u8> {
    build(1000)
}

#[derive(Default)]
struct Writer(Vec<u8>);

impl Writer {
    fn u16(&mut self, value: u16) -> &mut Self {
        self.0.extend_from_slice(&value.to_be_bytes());
        self
    }

    fn i16(&mut self, value: i16) -> &mut Self {
        self.0.extend_from_slice(&value.to_be_bytes());
        self
    }

    fn u32(&mut self, value: u32) -> &mut Self {
        self.0.extend_from_slice(&value.to_be_bytes());
        self
    }

    fn u8(&mut self, value: u8) -> &mut Self {
        self.0.push(value);
        self
    }

    fn pad4(&mut self) -> &mut Self {
        while self.0.len() % 4 != 0 {
            self.0.push(0);
        }
        self
    }
}

fn build(box_top: i16) -> Vec<u8> {
    let glyf = glyf(box_top);
    let glyph_len = glyf.len() as u32;
    let mut tables: Vec<(&[u8; 4], Vec<u8>)> = vec![
        (b"cmap", cmap()),
        (b"glyf", glyf),
        (b"head", head(box_top)),
        (b"hhea", hhea()),
        (b"hmtx", hmtx()),
        (b"loca", loca(glyph_len)),
        (b"maxp", maxp()),
    ];
    tables.sort_by(|a, b| a.0.cmp(b.0));

    let num_tables = tables.len() as u16;
    let entry_selector = 15 - num_tables.leading_zeros() as u16;
    let search_range = (1_u16 << entry_selector) * 16;

    let mut font = Writer::default();
    font.u32(0x0001_0000)
        .u16(num_tables)
        .u16(search_range)
        .u16(entry_selector)
        .u16(num_tables * 16 - search_range);

    let mut offset = 12 + 16 * tables.len() as u32;
    for (tag, data) in &tables {
        font.0.extend_from_slice(&tag[..]);
        font.u32(checksum(data))
            .u32(offset)
            .u32(data.len() as u32);
        offset += data.len().next_multiple_of(4) as u32;
    }
    for (_, data) in &tables {
        font.0.extend_from_slice(data);
        font.pad4();
    }
    font.0
}

fn checksum(data: &[u8]) -> u32 {
    data.chunks(4).fold(0_u32, |sum, chunk| {
        let mut word = [0_u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

fn head(box_top: i16) -> Vec<u8> {
    let mut w = Writer::default();
    w.u32(0x0001_0000) // version
        .u32(0x0001_0000) // fontRevision
        .u32(0) // checksumAdjustment
        .u32(0x5F0F_3CF5) // magicNumber
        .u16(0x0003) // flags
        .u16(UNITS_PER_EM)
        .u32(0)
        .u32(0) // created
        .u32(0)
        .u32(0) // modified
        .i16(BOX_X_MIN)
        .i16(0)
        .i16(BOX_X_MAX)
        .i16(box_top)
        .u16(0) // macStyle
        .u16(8) // lowestRecPPEM
        .i16(2) // fontDirectionHint
        .i16(1) // indexToLocFormat: long
        .i16(0); // glyphDataFormat
    w.0
}

fn hhea() -> Vec<u8> {
    let mut w = Writer::default();
    w.u32(0x0001_0000)
        .i16(ASCENDER)
        .i16(DESCENDER)
        .i16(0) // lineGap
        .u16(BOX_ADVANCE)
        .i16(0) // minLeftSideBearing
        .i16(0) // minRightSideBearing
        .i16(BOX_X_MAX)
        .i16(1) // caretSlopeRise
        .i16(0) // caretSlopeRun
        .i16(0) // caretOffset
        .i16(0)
        .i16(0)
        .i16(0)
        .i16(0)
        .i16(0) // metricDataFormat
        .u16(2); // numberOfHMetrics
    w.0
}

fn maxp() -> Vec<u8> {
    let mut w = Writer::default();
    w.u32(0x0001_0000)
        .u16(2) // numGlyphs
        .u16(4) // maxPoints
        .u16(1) // maxContours
        .u16(0) // maxCompositePoints
        .u16(0) // maxCompositeContours
        .u16(2) // maxZones
        .u16(0) // maxTwilightPoints
        .u16(0) // maxStorage
        .u16(0) // maxFunctionDefs
        .u16(0) // maxInstructionDefs
        .u16(0) // maxStackElements
        .u16(0) // maxSizeOfInstructions
        .u16(0) // maxComponentElements
        .u16(0); // maxComponentDepth
    w.0
}

fn hmtx() -> Vec<u8> {
    let mut w = Writer::default();
    w.u16(BOX_ADVANCE)
        .i16(BOX_X_MIN)
        .u16(SPACE_ADVANCE)
        .i16(0);
    w.0
}

fn glyf(box_top: i16) -> Vec<u8> {
    let width = BOX_X_MAX - BOX_X_MIN;
    let mut w = Writer::default();
    w.i16(1) // numberOfContours
        .i16(BOX_X_MIN)
        .i16(0)
        .i16(BOX_X_MAX)
        .i16(box_top)
        .u16(3) // endPtsOfContours
        .u16(0); // instructionLength
    for _ in 0..4 {
        // On curve, full-width coordinates.
        w.u8(0x01);
    }
    // Clockwise: up the left edge, across the top, down the right edge.
    w.i16(BOX_X_MIN).i16(0).i16(width).i16(0);
    w.i16(0).i16(box_top).i16(0).i16(-box_top);
    w.pad4();
    w.0
}

fn loca(glyph_len: u32) -> Vec<u8> {
    let mut w = Writer::default();
    w.u32(0).u32(glyph_len).u32(glyph_len);
    w.0
}

fn cmap() -> Vec<u8> {
    const SPACE: u16 = 0x20;
    let mut w = Writer::default();
    w.u16(0) // version
        .u16(1) // numTables
        .u16(3) // platformID: Windows
        .u16(1) // encodingID: Unicode BMP
        .u32(12);
    // Format 4 with a segment for U+0020 and the terminating segment.
    w.u16(4)
        .u16(32) // length
        .u16(0) // language
        .u16(4) // segCountX2
        .u16(4) // searchRange
        .u16(1) // entrySelector
        .u16(0) // rangeShift
        .u16(SPACE)
        .u16(0xFFFF) // endCode
        .u16(0) // reservedPad
        .u16(SPACE)
        .u16(0xFFFF) // startCode
        .u16(1_u16.wrapping_sub(SPACE))
        .u16(1) // idDelta
        .u16(0)
        .u16(0); // idRangeOffset
    w.0
}

#[test]
fn font_tables_are_four_byte_aligned() {
    let font = box_font();
    assert_eq!(font.len() % 4, 0, "font length should be padded");
    assert_eq!(&font[..4], &[0, 1, 0, 0], "TrueType sfnt version");
    assert_eq!(u16::from_be_bytes([font[4], font[5]]), 7, "table count");
}
