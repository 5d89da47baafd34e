use super::random_input;
use crate::container::ContainerError;
use crate::{compress, decompress, DecompressError};
use rand::SeedableRng;

#[test]
fn truncated_containers_never_decode() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(0xBAD_C0DE);
    for _ in 0..200 {
        let input = random_input(&mut rng, 300);
        let container = compress(&input).unwrap();
        for len in 0..container.len() {
            assert!(
                decompress(&container[..len]).is_err(),
                "input of {} bytes decoded after truncating the container to {len} of {} bytes",
                input.len(),
                container.len()
            );
        }
    }
}

#[test]
fn truncated_header_is_reported_as_such() {
    let container = compress(b"hello world").unwrap();
    // 8 leaves, so the header is 44 bytes long
    for len in 0..44 {
        assert!(matches!(
            decompress(&container[..len]),
            Err(DecompressError::Container(
                ContainerError::TruncatedHeader { .. }
            ))
        ));
    }
    assert!(matches!(
        decompress(&container[..44]),
        Err(DecompressError::MissingTrailer { got: 0 })
    ));
}

#[test]
fn appended_garbage_is_rejected() {
    let mut container = compress(b"aaabbc").unwrap();
    container.extend_from_slice(&[0xFF, 0xFF]);
    assert!(decompress(&container).is_err());
}

#[test]
fn decoding_garbage_does_not_panic() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(3);
    for _ in 0..2000 {
        let garbage = random_input(&mut rng, 64);
        let _ = decompress(&garbage);
    }
}
