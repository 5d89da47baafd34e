#![cfg(test)]

mod corruption;

use crate::container::ContainerHeader;
use crate::{compress, decompress, inspect, Codebook, FrequencyTable, HuffmanEncoder, HuffmanTree};
use alloc::vec::Vec;
use rand::{Rng, SeedableRng};

pub(crate) fn random_input(rng: &mut rand::rngs::SmallRng, max_len: usize) -> Vec<u8> {
    let alphabet = rng.gen_range(1..=256usize);
    let len = rng.gen_range(0..=max_len);
    (0..len).map(|_| rng.gen_range(0..alphabet) as u8).collect()
}

#[test]
fn round_trip_random_inputs() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(0xDEADBEEF);
    for _ in 0..500 {
        let input = random_input(&mut rng, 4096);
        let container = compress(&input).unwrap();
        assert_eq!(decompress(&container).unwrap(), input);
    }
}

#[test]
fn round_trip_skewed_input() {
    // mostly one symbol with a long tail of rare ones
    let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
    let input: Vec<u8> = (0..100_000)
        .map(|_| {
            if rng.gen_ratio(95, 100) {
                b' '
            } else {
                rng.gen()
            }
        })
        .collect();
    let container = compress(&input).unwrap();
    assert!(container.len() < input.len() / 2);
    assert_eq!(decompress(&container).unwrap(), input);
}

#[test]
fn every_byte_value() {
    let input: Vec<u8> = (0..=255u8).rev().chain(0..=255u8).collect();
    let container = compress(&input).unwrap();
    assert_eq!(inspect(&container).unwrap().header.table.len(), 256);
    assert_eq!(decompress(&container).unwrap(), input);
}

#[test]
fn every_small_payload_size() {
    // covers bodies shorter than, equal to and longer than the two trailer bytes
    for alphabet in [1u8, 2, 3, 5, 17] {
        for len in 0..=40usize {
            let input: Vec<u8> = (0..len).map(|i| (i * 7 % alphabet as usize) as u8).collect();
            let container = compress(&input).unwrap();
            let info = inspect(&container).unwrap();
            assert_eq!(info.body_bits % 8, u64::from(container[container.len() - 2]));
            assert_eq!(decompress(&container).unwrap(), input, "length {len}");
        }
    }
}

#[test]
fn empty_input() {
    let container = compress(b"").unwrap();
    let info = inspect(&container).unwrap();
    assert!(info.header.table.is_empty());
    assert_eq!(info.body_bits, 0);
    assert!(decompress(&container).unwrap().is_empty());
}

#[test]
fn single_distinct_byte() {
    let container = compress(b"AAAA").unwrap();
    let info = inspect(&container).unwrap();
    assert_eq!(info.header.table.len(), 1);
    assert_eq!(info.body_bits, 4);
    assert_eq!(decompress(&container).unwrap(), b"AAAA");

    let long = alloc::vec![0xAB; 1001];
    assert_eq!(decompress(&compress(&long).unwrap()).unwrap(), long);
}

#[test]
fn frequencies_sum_to_input_length() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(42);
    for _ in 0..100 {
        let input = random_input(&mut rng, 2000);
        let container = compress(&input).unwrap();
        let (header, _) = ContainerHeader::parse(&container).unwrap();
        assert_eq!(header.table.total(), input.len() as u64);
    }
}

#[test]
fn compression_is_deterministic() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(1234);
    for _ in 0..100 {
        let input = random_input(&mut rng, 1000);
        let first = compress(&input).unwrap();
        let second = HuffmanEncoder::new(&input).unwrap().encode().unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn body_size_matches_codebook() {
    let input = b"it was the best of times, it was the worst of times";
    let table = FrequencyTable::from_bytes(input);
    let book = Codebook::from_tree(&HuffmanTree::build(&table).unwrap());
    let info = inspect(&compress(input).unwrap()).unwrap();
    assert_eq!(info.body_bits, book.encoded_bits(&table));
}

#[cfg(feature = "std")]
#[test]
fn independent_inputs_compress_in_parallel() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(99);
    let inputs: Vec<Vec<u8>> = (0..8).map(|_| random_input(&mut rng, 10_000)).collect();
    let sequential: Vec<Vec<u8>> = inputs.iter().map(|i| compress(i).unwrap()).collect();

    let parallel: Vec<Vec<u8>> = std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| scope.spawn(move || compress(input).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(sequential, parallel);
}
