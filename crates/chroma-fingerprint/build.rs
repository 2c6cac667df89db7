use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Number of entries in each transfer-function table.
const LUT_SIZE: usize = 4096;

/// IEC 61966-2-1 decoding: encoded sRGB to linear light
fn decode(encoded: f64) -> f64 {
    if encoded <= 0.04045 {
        encoded / 12.92
    } else {
        ((encoded + 0.055) / 1.055).powf(2.4)
    }
}

/// IEC 61966-2-1 encoding: linear light to encoded sRGB
fn encode(linear: f64) -> f64 {
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

fn write_table(out: &mut impl Write, name: &str, doc: &str, f: fn(f64) -> f64) -> io::Result<()> {
    writeln!(out, "/// {doc}")?;
    writeln!(out, "/// Index: input * {}.0", LUT_SIZE - 1)?;
    writeln!(out, "pub static {name}: [f32; {LUT_SIZE}] = [")?;
    for i in 0..LUT_SIZE {
        if i > 0 && i % 8 == 0 {
            writeln!(out)?;
        }
        let x = i as f64 / (LUT_SIZE - 1) as f64;
        write!(out, "    {:.9},", f(x) as f32)?;
    }
    writeln!(out, "\n];\n")
}

fn main() -> io::Result<()> {
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let dest = Path::new(&out_dir).join("transfer_lut.rs");
    let mut file = File::create(dest)?;

    write_table(
        &mut file,
        "DECODE_LUT",
        "sRGB transfer decode table (encoded -> linear)",
        decode,
    )?;
    write_table(
        &mut file,
        "ENCODE_LUT",
        "sRGB transfer encode table (linear -> encoded)",
        encode,
    )?;

    println!("cargo::rerun-if-changed=build.rs");
    Ok(())
}
