use crate::{PointerWidth, align_up, metadata_symbol};

#[test]
fn pointer_width_from_bytes() {
    assert_eq!(PointerWidth::from_bytes(4), Some(PointerWidth::Four));
    assert_eq!(PointerWidth::from_bytes(8), Some(PointerWidth::Eight));
    assert_eq!(PointerWidth::from_bytes(2), None);
    assert_eq!(PointerWidth::from_bytes(16), None);
    assert_eq!(PointerWidth::from_bytes(0), None);
}

#[test]
fn pointer_alignment_is_log2_of_width() {
    assert_eq!(PointerWidth::Four.align_log2(), 2);
    assert_eq!(PointerWidth::Eight.align_log2(), 3);
    for width in [PointerWidth::Four, PointerWidth::Eight] {
        assert_eq!(1usize << width.align_log2(), width.bytes());
    }
}

#[test]
fn align_up_rounds_to_multiple() {
    assert_eq!(align_up(0, 8), 0);
    assert_eq!(align_up(1, 8), 8);
    assert_eq!(align_up(8, 8), 8);
    assert_eq!(align_up(18, 4), 20);
    assert_eq!(align_up(18, 8), 24);
}

#[test]
fn symbol_name() {
    assert_eq!(metadata_symbol("main"), "_gc_metadata_main");
}
