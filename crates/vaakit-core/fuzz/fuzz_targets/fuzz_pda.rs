#![no_main]

use libfuzzer_sys::fuzz_target;
use vaakit_core::{create_program_address, find_program_address, Address, PdaError, MAX_SEEDS};

fuzz_target!(|data: &[u8]| {
    if data.len() < 32 {
        return;
    }
    let (program, rest) = data.split_at(32);
    let mut program_id = [0u8; 32];
    program_id.copy_from_slice(program);
    let program_id = Address::new_from_array(program_id);

    let seeds: Vec<&[u8]> = rest.chunks(40).take(MAX_SEEDS).collect();
    match find_program_address(&seeds, &program_id) {
        Ok((address, bump)) => {
            let mut with_bump = seeds.clone();
            let bump_seed = [bump];
            with_bump.push(&bump_seed);
            let direct = create_program_address(&with_bump, &program_id).unwrap();
            assert_eq!(direct.to_bytes(), address.to_bytes());
        }
        Err(PdaError::MaxSeedLengthExceeded) | Err(PdaError::TooManySeeds) => {}
        Err(other) => panic!("unexpected derivation error: {other}"),
    }
});
