use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use sha2::{Digest, Sha256};

use flowcard::{compose_to_writer, Brief};

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens");
    p.push(name);
    p
}

fn render_bytes() -> Vec<u8> {
    let brief = Brief {
        overlay: "Buy a Widget".to_string(),
        elements: vec!["Search".to_string(), "Open".to_string(), "Buy".to_string()],
    };
    let mut cursor = Cursor::new(Vec::new());
    compose_to_writer(&brief, &mut cursor, None, None).expect("compose failed");
    cursor.into_inner()
}

#[test]
fn golden_card_digest_matches_fixture() {
    let png = render_bytes();
    let digest = hex::encode(Sha256::digest(&png));

    let expected_path = golden_path("default_card.sha256");
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all("tests/goldens").ok();
        fs::write(&expected_path, &digest).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    if !expected_path.exists() {
        println!(
            "No golden at {:?}; run with UPDATE_GOLDENS=1 to create it. Skipping.",
            expected_path
        );
        return;
    }

    let exp = fs::read_to_string(&expected_path).expect("unable to read golden");
    assert_eq!(digest, exp.trim());
}
