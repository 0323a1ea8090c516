// This binary crate is intentionally minimal.
// All network logic lives in the library (src/lib.rs and its modules).
// Run demos with:
//   cargo run --example hopfield
//   cargo run --example classify
fn main() {
    println!("neurolab: Hopfield and multilayer neural networks in Rust.");
    println!("Run `cargo run --example hopfield` for the associative memory demo,");
    println!("or `cargo run --bin studio` for the browser lab.");
}
