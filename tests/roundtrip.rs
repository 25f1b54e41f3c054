use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use bitplane_stego::common::image_io;
use bitplane_stego::processing::bit_plane::{capacity_bits, plane_bits};
use bitplane_stego::processing::steganography::{
    decode_file, embed_message, embed_text_bytes, encode_file, extract_message,
    extract_text_bytes, total_capacity_bits,
};
use bitplane_stego::{BitPlane, Completion, Diagnostic, PixelArray};

fn random_cover(rows: usize, columns: usize, bands: usize, seed: u64) -> PixelArray {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut samples = vec![0u8; rows * columns * bands];
    rng.fill(&mut samples[..]);
    PixelArray::new(rows, columns, bands, samples).unwrap()
}

#[test]
fn test_roundtrip_every_plane() {
    let cover = random_cover(32, 24, 3, 1);
    let texts: [&[u8]; 4] = [
        b"Simple steganography exercise",
        "multi-byte: ação, 日本語, 🦀".as_bytes(),
        b"line one\nline two\r\n\ttabbed",
        &[b'a', 0xED, 0xA0, 0x80, b'z'],
    ];

    for plane in BitPlane::ALL {
        for text in texts {
            let outcome = embed_message(&cover, text, plane);
            assert_eq!(outcome.report.completion, Completion::Done);
            assert_eq!(outcome.pixels.shape(), cover.shape());

            let extracted = extract_message(&outcome.pixels, plane);
            assert_eq!(extracted.text, text.to_vec(), "plane {}", plane);
            assert_eq!(extracted.report.completion, Completion::Done);
        }
    }
}

#[test]
fn test_empty_and_nul_messages_decode_to_placeholder() {
    let cover = random_cover(8, 8, 1, 2);

    for text in [&b""[..], &b"\0"[..]] {
        let outcome = embed_message(&cover, text, BitPlane::Zero);
        assert_eq!(outcome.report.message_bits, 8);

        let extracted = extract_message(&outcome.pixels, BitPlane::Zero);
        assert_eq!(extracted.report.terminator_plane, Some(BitPlane::Zero));
        assert!(extracted.bits.is_empty());
        assert_eq!(extracted.text, vec![0]);
    }
}

#[test]
fn test_plane_zero_ignores_higher_planes() {
    let cover = random_cover(16, 16, 3, 3);
    let text = b"only the least significant plane matters";
    let mut samples = embed_message(&cover, text, BitPlane::Zero).pixels.into_raw();

    let mut rng = StdRng::seed_from_u64(4);
    for sample in &mut samples {
        *sample = (*sample & !0b110) | (rng.gen::<u8>() & 0b110);
    }
    let scrambled = PixelArray::new(16, 16, 3, samples).unwrap();

    assert_eq!(extract_message(&scrambled, BitPlane::Zero).text, text.to_vec());
}

#[test]
fn test_message_larger_than_three_planes() {
    let cover = random_cover(4, 4, 3, 5);
    let text: Vec<u8> = b"abcdefghijklmnopqrstuvwxyz".repeat(2);
    assert!((text.len() + 1) * 8 > total_capacity_bits(&cover));

    let outcome = embed_message(&cover, &text, BitPlane::Zero);
    assert_eq!(outcome.report.completion, Completion::ExhaustedIncomplete);
    assert_eq!(
        outcome.report.diagnostic,
        Some(Diagnostic::CapacityExceeded {
            unplaced_bits: (text.len() + 1) * 8 - total_capacity_bits(&cover)
        })
    );
    assert!(outcome.report.planes.iter().all(|p| p.is_full()));

    let extracted = extract_message(&outcome.pixels, BitPlane::Zero);
    assert_eq!(extracted.report.diagnostic, Some(Diagnostic::SentinelNotFound));
    assert_eq!(extracted.report.recovered_bits, total_capacity_bits(&cover));
    assert_eq!(extracted.text, text[..18].to_vec());
}

#[test]
fn test_capacity_boundary() {
    // 8 bytes per plane: 7 characters plus terminator fill plane 0 exactly
    let cover = random_cover(8, 8, 1, 6);
    assert_eq!(capacity_bits(&cover), 64);

    let exact = embed_message(&cover, b"1234567", BitPlane::Zero);
    assert_eq!(exact.report.planes.len(), 1);
    assert!(exact.report.planes[0].is_full());

    let over = embed_message(&cover, b"12345678", BitPlane::Zero);
    assert_eq!(over.report.planes.len(), 2);
    assert_eq!(over.report.planes[1].message_bits, 8);
    assert_eq!(
        plane_bits(&over.pixels, BitPlane::One).as_slice()[..8],
        [0; 8]
    );

    assert_eq!(extract_message(&exact.pixels, BitPlane::Zero).text, b"1234567".to_vec());
    assert_eq!(extract_message(&over.pixels, BitPlane::Zero).text, b"12345678".to_vec());
}

#[test]
fn test_in_memory_png() {
    let cover = random_cover(12, 10, 4, 7);
    let cover_png = image_io::encode_png(&cover).unwrap();

    let carrier = embed_text_bytes(&cover_png, b"through PNG bytes", BitPlane::Two).unwrap();
    let text = extract_text_bytes(&carrier, BitPlane::Two).unwrap();
    assert_eq!(text, b"through PNG bytes".to_vec());
}

#[test]
fn test_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let cover_path = dir.path().join("cover.png");
    let text_path = dir.path().join("secret.txt");
    let carrier_path = dir.path().join("outputs").join("carrier.png");
    let recovered_path = dir.path().join("outputs").join("recovered.txt");

    image_io::save_pixels(&cover_path, &random_cover(20, 30, 3, 8)).unwrap();
    let text = "Unicamp\nIntrodução ao Processamento de Imagem Digital\n".repeat(6);
    std::fs::write(&text_path, &text).unwrap();

    let embed = encode_file(&cover_path, &text_path, BitPlane::One, &carrier_path).unwrap();
    assert_eq!(embed.completion, Completion::Done);
    assert!(embed.planes.len() > 1);

    let extract = decode_file(&carrier_path, BitPlane::One, &recovered_path).unwrap();
    assert_eq!(extract.completion, Completion::Done);
    assert_eq!(std::fs::read_to_string(&recovered_path).unwrap(), text);
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = encode_file(
        dir.path().join("missing.png"),
        dir.path().join("missing.txt"),
        BitPlane::Zero,
        dir.path().join("out.png"),
    );
    assert!(result.is_err());
    assert!(!dir.path().join("out.png").exists());
}
