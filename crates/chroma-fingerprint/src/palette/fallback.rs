//! Embedded Sanzo Wada palettes
//!
//! A curated 30-palette subset of the catalog, used whenever the network
//! catalog cannot be loaded. Colors are `0xRRGGBB`.

use super::id::PaletteId;
use super::reference::ReferencePalette;
use crate::color::{Lab, Srgb};

const FALLBACK_PALETTES: [(&str, &str, [u32; 4]); 30] = [
    ("001", "Plum Mouse Gray", [0x917877, 0xE9DFE0, 0xD3BCB3, 0xB97B6D]),
    ("002", "Shrimp Brown", [0x772C25, 0xAF4436, 0xD7C4BB, 0xE8D5C8]),
    ("003", "Fukagawa Mouse Gray", [0x5B7E91, 0x93B5C6, 0xBBC8D4, 0xD4E2E8]),
    ("004", "Cherry Mouse Gray", [0xA88E87, 0xE8D4CD, 0xEAD7CE, 0xF4E9E3]),
    ("005", "Indigo Mouse Gray", [0x5C6D7C, 0x8B9FAF, 0xB2C2CE, 0xD5E0E8]),
    ("006", "Willow Mouse Gray", [0x7F8A7F, 0xA8B5A8, 0xC5D0C5, 0xDEE5DE]),
    ("007", "Nightingale Brown", [0x6C5B3D, 0xA08C68, 0xC9B897, 0xE5D9C1]),
    ("008", "Seaweed Brown", [0x5B6356, 0x8C9486, 0xB7C0B2, 0xD8DED4]),
    ("009", "Navy Blue", [0x003854, 0x1E5A74, 0x4A7C92, 0x76A0B3]),
    ("010", "Crimson", [0xAB2D3A, 0xC74654, 0xDC8189, 0xECBCC0]),
    ("011", "Nightingale Green", [0x6C6B2C, 0x949438, 0xB9B95A, 0xD9D98C]),
    ("012", "Siskin Brown", [0x8F8526, 0xB7AE45, 0xCEC870, 0xE3DC9A]),
    ("013", "Celadon", [0x78AFA3, 0x9AC8BE, 0xBDD9D1, 0xDEE9E5]),
    ("014", "Azuki Bean Red", [0x6F3430, 0x954E47, 0xB87C76, 0xD9B3AE]),
    ("015", "Water Blue", [0x7DB9DE, 0xA0CFE8, 0xBFE0F0, 0xDEEFF7]),
    ("016", "Mustard", [0xC4972F, 0xD9B44A, 0xE5C76B, 0xEFE0A2]),
    ("017", "Peony Pink", [0xE03C8A, 0xED6EA7, 0xF49EC0, 0xFAD0DC]),
    ("018", "Blue-Green", [0x00A497, 0x00BFB0, 0x5CD1C7, 0xA3E5DE]),
    ("019", "Yamabuki Yellow", [0xF5B800, 0xF8C500, 0xFAD64B, 0xFCE78C]),
    ("020", "Peach", [0xF19CA7, 0xF5B5BD, 0xF9CFD4, 0xFCE8EA]),
    ("021", "Dayflower Blue", [0x2F5DA6, 0x5580BE, 0x7FA3D1, 0xB3CCE5]),
    ("022", "Spring Green", [0x8FC31F, 0xA7D143, 0xBFDD6E, 0xD9EBA3]),
    ("023", "Light Indigo", [0x00A3AF, 0x00BCC9, 0x4DD2DC, 0x99E5EC]),
    ("024", "Crimson Red", [0xD71345, 0xE64166, 0xF07B95, 0xF9BEC7]),
    ("025", "Purple", [0x884898, 0xA367B1, 0xBE8DCA, 0xDCBFE7]),
    ("026", "Mouse Gray", [0x787878, 0x9B9B9B, 0xBEBEBE, 0xE0E0E0]),
    ("027", "Ink Black", [0x3A3A3A, 0x5E5E5E, 0x828282, 0xA6A6A6]),
    ("028", "Pale Blue-Green", [0x83CCD2, 0xA3DAE0, 0xC3E8ED, 0xE3F6F8]),
    ("029", "Young Grass Green", [0xC3D825, 0xD3E445, 0xE3F06B, 0xF3FC9B]),
    ("030", "Cherry Blossom Pink", [0xFEEEED, 0xFDD5D3, 0xFCBCB9, 0xFBA3A0]),
];

#[inline]
fn unpack(rgb: u32) -> Srgb {
    Srgb::from_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// The embedded palettes in id order.
pub(crate) fn fallback_palettes() -> Vec<ReferencePalette> {
    FALLBACK_PALETTES
        .iter()
        .map(|(id, name, colors)| {
            let srgb: Vec<Srgb> = colors.iter().map(|&c| unpack(c)).collect();
            let lab = srgb.iter().map(|&c| Lab::from(c)).collect();
            ReferencePalette::from_parts(PaletteId::from(*id), (*name).to_string(), srgb, lab)
        })
        .collect()
}
