//! Casts between native vectors and pair-composed vectors of the same lane count.
//!
//! These are backend-independent: the native side is split (or joined) into
//! 4-lane halves and the backend's 4-lane cast does the per-lane work. Casts
//! between two pairs come from the blanket `Pair<A> -> Pair<B>` impl in
//! [`pair`](crate::pair), so e.g. `U16x16 -> Pair<I32x8>` needs nothing here.

use crate::backend::{I16x8, U16x8};
use crate::pair::{F32x8, I32x8, Pair, U8x8};
use crate::vector::{Halves, LaneCast};

/// Native 8-lane source, pair of 4-lane destination: cast each half.
macro_rules! widen_via_halves {
    ($($src:ident => $dst:ident;)*) => {
        $(
            impl LaneCast<$dst> for $src {
                #[inline(always)]
                fn cast(self) -> $dst {
                    let (lo, hi) = self.split();
                    Pair::new(lo.cast(), hi.cast())
                }
            }
        )*
    };
}

/// Pair of 4-lane source, native 8-lane destination: cast each half, then join.
macro_rules! narrow_via_halves {
    ($($src:ident => $dst:ident;)*) => {
        $(
            impl LaneCast<$dst> for $src {
                #[inline(always)]
                fn cast(self) -> $dst {
                    $dst::join(self.lo.cast(), self.hi.cast())
                }
            }
        )*
    };
}

widen_via_halves! {
    U16x8 => I32x8;
    U16x8 => F32x8;
    U16x8 => U8x8;
    I16x8 => I32x8;
}

narrow_via_halves! {
    I32x8 => U16x8;
    F32x8 => U16x8;
    U8x8 => U16x8;
    I32x8 => I16x8;
}

#[cfg(test)]
mod tests {
    use crate::backend::{I16x8, U16x8};
    use crate::pair::{F32x8, I32x8, U8x8};
    use crate::vector::{SimdVector, cast};

    #[test]
    fn test_u16x8_to_i32x8_zero_extends() {
        let v = U16x8::from_array([0, 1, 255, 256, 32_767, 32_768, 60_000, 65_535]);
        let w: I32x8 = cast(v);
        assert_eq!(w.to_array(), [0, 1, 255, 256, 32_767, 32_768, 60_000, 65_535]);
    }

    #[test]
    fn test_i32x8_to_u16x8_saturates() {
        let w = I32x8::from_array([-1, 0, 1, 65_535, 65_536, 100_000, i32::MIN, i32::MAX]);
        let v: U16x8 = cast(w);
        assert_eq!(v.to_array(), [0, 0, 1, 65_535, 65_535, 65_535, 0, 65_535]);
    }

    #[test]
    fn test_f32x8_u16x8() {
        let f = F32x8::from_array([0.0, 0.9, 1.5, 1000.7, -3.0, 70_000.0, 65_535.0, 2.0]);
        let v: U16x8 = cast(f);
        assert_eq!(v.to_array(), [0, 0, 1, 1000, 0, 65_535, 65_535, 2]);
        let back: F32x8 = cast(v);
        assert_eq!(back.lane(3), 1000.0);
    }

    #[test]
    fn test_u16x8_u8x8() {
        let v = U16x8::from_array([0, 1, 127, 128, 255, 256, 1000, 65_535]);
        let n: U8x8 = cast(v);
        assert_eq!(n.to_array(), [0, 1, 127, 128, 255, 255, 255, 255]);
        let w: U16x8 = cast(n);
        assert_eq!(w.to_array(), [0, 1, 127, 128, 255, 255, 255, 255]);
    }

    #[test]
    fn test_i16x8_i32x8() {
        let v = I16x8::from_array([-32_768, -1, 0, 1, 32_767, -300, 300, 7]);
        let w: I32x8 = cast(v);
        assert_eq!(w.to_array(), [-32_768, -1, 0, 1, 32_767, -300, 300, 7]);
        let big = I32x8::from_array([40_000, -40_000, 0, 1, 2, 3, 4, 5]);
        let n: I16x8 = cast(big);
        assert_eq!(n.to_array(), [32_767, -32_768, 0, 1, 2, 3, 4, 5]);
    }
}
