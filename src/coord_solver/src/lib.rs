#![warn(clippy::pedantic)]
#![allow(clippy::similar_names, clippy::too_many_lines)]

pub mod coordinate;
pub mod cube;
pub mod goals;
pub mod move_table;
pub mod notation;
pub mod pruning;
pub mod solver;
pub mod space;

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}

// Orbits never exceed 12 pieces, so 19! is plenty of headroom
const FACT_UNTIL_19: [u64; 20] = {
    let mut arr = [0; 20];
    arr[0] = 1;
    let mut i = 1;
    while i < arr.len() {
        arr[i] = arr[i - 1] * i as u64;
        i += 1;
    }
    arr
};
