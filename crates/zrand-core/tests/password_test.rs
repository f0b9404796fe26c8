//! End-to-end tests for the stock password tree.
//!
//! Layout: `[3 upper][shuffle(3 lower + 3 digit + 3 letter)][3 lower]`

use rand::rngs::StdRng;
use rand::SeedableRng;
use zrand_core::{build, build_string, build_with, password, Recipe};

fn check_password(out: &[u8]) {
    assert_eq!(out.len(), 15, "password must be 15 bytes");

    let (head, rest) = out.split_at(3);
    let (middle, tail) = rest.split_at(9);

    assert!(head.iter().all(u8::is_ascii_uppercase), "head: {head:?}");
    assert!(tail.iter().all(u8::is_ascii_lowercase), "tail: {tail:?}");

    // 3 digits, 3 lowercase, 3 from either case, in any order
    let digits = middle.iter().filter(|b| b.is_ascii_digit()).count();
    let lowers = middle.iter().filter(|b| b.is_ascii_lowercase()).count();
    let uppers = middle.iter().filter(|b| b.is_ascii_uppercase()).count();
    assert_eq!(digits, 3, "middle: {middle:?}");
    assert!(lowers >= 3, "middle: {middle:?}");
    assert_eq!(digits + lowers + uppers, 9, "middle: {middle:?}");
}

#[test]
fn password_layout_from_os_rng() {
    let op = password();
    for _ in 0..200 {
        check_password(&build(&op).unwrap());
    }
}

#[test]
fn password_layout_across_seeds() {
    let op = password();
    for seed in 0..500 {
        check_password(&build_with(&op, &mut StdRng::seed_from_u64(seed)).unwrap());
    }
}

#[test]
fn password_string_is_ascii() {
    let s = build_string(&password()).unwrap();
    assert_eq!(s.len(), 15);
    assert!(s.is_ascii());
}

#[test]
fn password_op_is_shareable_across_threads() {
    let op = std::sync::Arc::new(password());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let op = op.clone();
            std::thread::spawn(move || build(&op).unwrap())
        })
        .collect();
    for handle in handles {
        check_password(&handle.join().unwrap());
    }
}

#[test]
fn password_from_toml_recipe() {
    let recipe: Recipe = toml::from_str(
        r#"
        concat = [
            { select = { source = { alphabet = "uppers" }, size = 3 } },
            { shuffle = { concat = [{ select = { source = { alphabet = "lowers" }, size = 3 } }, { select = { source = { alphabet = "numerics" }, size = 3 } }, { select = { source = { alphabet = "letters" }, size = 3 } }] } },
            { select = { source = { alphabet = "lowers" }, size = 3 } },
        ]
        "#,
    )
    .unwrap();

    let op = recipe.to_op().unwrap();
    assert_eq!(op, password());
    check_password(&build(&op).unwrap());
}
