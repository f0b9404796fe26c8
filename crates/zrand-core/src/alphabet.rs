//! Predefined alphabets and stock operation trees

use crate::op::Op;

pub const LOWERS: Op = Op::from_static(b"abcdefghijklmnopqrstuvwxyz");
pub const UPPERS: Op = Op::from_static(b"ABCDEFGHIJKLMNOPQRSTUVWXYZ");
pub const NUMERICS: Op = Op::from_static(b"0123456789");

/// Lowercase followed by uppercase (52 bytes).
pub fn letters() -> Op {
    Op::concat([LOWERS, UPPERS])
}

/// A 15-character password:
/// ```text
/// [3 upper][shuffle(3 lower + 3 digit + 3 letter)][3 lower]
/// ```
pub fn password() -> Op {
    Op::concat([
        Op::select(UPPERS, 3),
        Op::shuffle(Op::concat([
            Op::select(LOWERS, 3),
            Op::select(NUMERICS, 3),
            Op::select(letters(), 3),
        ])),
        Op::select(LOWERS, 3),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters() {
        assert_eq!(letters().output_len(), 52);
        assert_eq!(letters().randomness_len(), 0);
    }

    #[test]
    fn test_password_requirements() {
        let op = password();
        assert_eq!(op.output_len(), 15);
        // 26 + 26 + (26 + 10 + 52)
        assert_eq!(op.scratch_len(), 140);
        // 3 + (9 + 9) + 3
        assert_eq!(op.randomness_len(), 24);
    }
}
