use std::fs;

use huffkit::{compress_with_stats, decompress};


fn main() {

    let dir = fs::read_dir("test_data")
        .unwrap_or_else(|err| panic!("Could not read test_data: {err}"));

    for entry in dir {

        let path = entry
            .unwrap_or_else(|err| panic!("Could not read directory entry: {err}"))
            .path();

        let data = fs::read(&path)
            .unwrap_or_else(|err| panic!("Could not open file {}: {err}", path.display()));

        let (archive, stats) = compress_with_stats(&data)
            .unwrap_or_else(|err| panic!("Could not compress {}: {err}", path.display()));

        assert_eq!(decompress(&archive).as_deref(), Ok(&data[..]));

        println!("{}\nOriginal size: {} bytes\nArchive size: {} bytes\nPacked payload size: {} bytes\nArchive ratio: {:.2}\n",
            path.display(), stats.original_len, stats.archive_len, stats.packed_payload_bytes(),
            stats.archive_ratio().unwrap_or(0.0));
    }

}
