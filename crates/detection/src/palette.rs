/// Shared visualization palette. All indexing is `mod 15`; no component ever
/// writes to it.
pub const PALETTE: [[u8; 3]; 15] = [
    [230, 25, 75],
    [60, 180, 75],
    [0, 130, 200],
    [245, 130, 48],
    [145, 30, 180],
    [70, 240, 240],
    [240, 50, 230],
    [210, 245, 60],
    [250, 190, 190],
    [0, 128, 128],
    [220, 190, 255],
    [128, 128, 0],
    [170, 110, 40],
    [255, 215, 180],
    [0, 0, 0],
];

/// The label whose detections cycle through the palette sequentially.
pub const ROOM_LABEL: &str = "room";

/// Deterministic color for a detection.
///
/// Room detections (case-insensitive) take `PALETTE[ordinal mod 15]`, where
/// `ordinal` is the 0-based position within the room-only sequence being
/// rendered, so consecutive rooms walk the whole palette before repeating.
/// Any other label hashes to a stable slot independent of position.
pub fn label_color(label: &str, ordinal: usize) -> [u8; 3] {
    if label.eq_ignore_ascii_case(ROOM_LABEL) {
        PALETTE[ordinal % PALETTE.len()]
    } else {
        PALETTE[hash_slot(label)]
    }
}

/// 31-polynomial hash over code points with wrapping 32-bit signed
/// arithmetic. The wraparound is part of the contract: arbitrary-precision
/// arithmetic would assign different colors to long labels.
/// `unsigned_abs` keeps the slot well-defined even when the hash lands on
/// `i32::MIN`.
fn hash_slot(label: &str) -> usize {
    let mut h: i32 = 0;
    for c in label.chars() {
        h = h.wrapping_mul(31).wrapping_add((c as u32) as i32);
    }
    (h.unsigned_abs() as usize) % PALETTE.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_color_cycles_through_palette() {
        assert_eq!(label_color("room", 0), PALETTE[0]);
        assert_eq!(label_color("Room", 3), PALETTE[3]);
        assert_eq!(label_color("ROOM", 15), PALETTE[0]);
        assert_eq!(label_color("room", 17), PALETTE[2]);
    }

    #[test]
    fn non_room_color_ignores_ordinal() {
        let c0 = label_color("wall", 0);
        let c9 = label_color("wall", 9);
        assert_eq!(c0, c9);
    }

    #[test]
    fn hash_matches_reference_values() {
        // "wall" through h = h*31 + code: w=119, a=97, l=108, l=108
        let mut h: i64 = 0;
        for c in "wall".chars() {
            h = h * 31 + c as i64;
        }
        assert_eq!(hash_slot("wall"), (h.unsigned_abs() as usize) % 15);
    }

    #[test]
    fn hash_wraps_at_32_bits() {
        // Long enough that arbitrary-precision arithmetic would diverge from
        // the wrapping result.
        let label = "a-very-long-label-that-overflows-thirty-two-bits";
        let slot = hash_slot(label);
        assert!(slot < PALETTE.len());
        // Stable across calls.
        assert_eq!(hash_slot(label), slot);
    }

    #[test]
    fn color_is_pure() {
        assert_eq!(label_color("door", 2), label_color("door", 2));
        assert_eq!(label_color("room", 7), label_color("room", 7));
    }
}
