use std::fs::File;

use text_huffman::{Container, HuffmanCodec};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sample_text = "Hello, world! This is a sample text for Huffman compression. \
                      The quick brown fox jumps over the lazy dog. \
                      Huffman encoding is a greedy algorithm that builds optimal prefix codes.";

    std::fs::write("sample.txt", sample_text)?;
    println!("Created sample file: {} bytes", sample_text.len());

    let input = File::open("sample.txt")?;
    let output = File::create("sample.huff")?;
    let stats = HuffmanCodec::encode_from_file(input, output)?;
    println!(
        "Compressed to: {} bytes ({:.1}% saved)",
        stats.compressed_bytes,
        stats.ratio_percent()
    );

    let container = Container::parse(&std::fs::read("sample.huff")?)?;
    println!("Code table ({} symbols):", container.table.len());
    for (symbol, code) in container.table.iter() {
        println!("  {symbol:?} -> {code}");
    }

    let compressed = File::open("sample.huff")?;
    let decompressed = File::create("decompressed.txt")?;
    HuffmanCodec::decode_from_file(compressed, decompressed)?;

    let decompressed_text = std::fs::read_to_string("decompressed.txt")?;
    if sample_text != decompressed_text {
        return Err("decompressed text does not match the original".into());
    }
    println!("Decompression successful, data matches exactly.");

    std::fs::remove_file("sample.txt")?;
    std::fs::remove_file("sample.huff")?;
    std::fs::remove_file("decompressed.txt")?;

    Ok(())
}
