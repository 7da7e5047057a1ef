use std::fs;
use std::path::PathBuf;

use diskette::disk::{Volume, SECTORS_PER_TRACK, SECTOR_SIZE, TRACK0_SIZE};
use diskette::Ebcdic;

const BLANK: u8 = 0x40;

fn unused_sector() -> Vec<u8> {
    let mut bytes = vec![BLANK; 80];
    bytes.resize(SECTOR_SIZE, 0x00);
    bytes
}

fn text_sector(text: &str) -> Vec<u8> {
    let mut bytes = Ebcdic::from_str_lossy(text).as_bytes().to_vec();
    assert!(bytes.len() <= SECTOR_SIZE);
    bytes.resize(SECTOR_SIZE, BLANK);
    bytes
}

fn encode_char(c: char) -> u8 {
    Ebcdic::from_str_lossy(&c.to_string()).as_bytes()[0]
}

/// A volume label with the given physical-record-length code (None for
/// the 128-byte default) and IBM standard labels flagged.
fn volume_label(code: Option<char>) -> Vec<u8> {
    let mut bytes = text_sector("VOL1TESTDK");
    if let Some(code) = code {
        bytes[75] = encode_char(code);
    }
    bytes[79] = encode_char('W');
    bytes
}

/// A HDR1 label: begin-of-extent and end-of-data are five-character
/// "tt0ss" fields at offsets 28 and 74.
fn hdr1(name: &str, data_length: usize, begin: (u32, u32), end: (u32, u32)) -> Vec<u8> {
    let mut line = format!(
        "HDR1 {:<17}{:05} {:02}0{:02}",
        name, data_length, begin.0, begin.1
    );
    line.push_str(&" ".repeat(74 - line.chars().count()));
    line.push_str(&format!("{:02}0{:02}", end.0, end.1));
    text_sector(&line)
}

/// Track 0 with unused control sectors, an ERMAP, the given volume
/// label, and the given header records starting at slot 7.
fn track0(label: Vec<u8>, headers: Vec<Vec<u8>>) -> Vec<Vec<u8>> {
    let mut sectors: Vec<Vec<u8>> = (0..SECTORS_PER_TRACK)
        .map(|i| match i {
            0..=3 => unused_sector(),
            4 => text_sector("ERMAP"),
            _ => text_sector(""),
        })
        .collect();
    sectors[6] = label;
    for (slot, header) in headers.into_iter().enumerate() {
        sectors[7 + slot] = header;
    }
    sectors
}

/// Assemble the image: track 0 plus blank data tracks, with the given
/// records placed at their 1-based (track, sector) addresses.
fn assemble(
    track0: Vec<Vec<u8>>,
    record_length: usize,
    data_tracks: usize,
    records: &[((u32, u32), &str)],
) -> Vec<u8> {
    let mut bytes = track0.concat();
    bytes.resize(
        TRACK0_SIZE + data_tracks * SECTORS_PER_TRACK * record_length,
        BLANK,
    );
    for &((track, sector), text) in records {
        let offset = TRACK0_SIZE
            + ((track as usize - 1) * SECTORS_PER_TRACK + (sector as usize - 1)) * record_length;
        let encoded = Ebcdic::from_str_lossy(text);
        assert!(encoded.len() <= record_length);
        bytes[offset..offset + encoded.len()].copy_from_slice(encoded.as_bytes());
    }
    bytes
}

/// A fresh scratch directory path for the extractor to create.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("diskette-{}-{}", name, std::process::id()));
    if dir.exists() {
        fs::remove_dir_all(&dir).unwrap();
    }
    dir
}

#[test]
fn extracts_data_sets() {
    let headers = vec![
        hdr1("MYDATA", 10, (1, 1), (1, 4)),
        hdr1("SECOND", 5, (1, 4), (1, 6)),
    ];
    let image = assemble(
        track0(volume_label(None), headers),
        128,
        1,
        &[
            ((1, 1), "RECORD ONE"),
            ((1, 2), "RECORD TWO"),
            ((1, 3), "RECORD 3"),
            ((1, 4), "ALPHA"),
            ((1, 5), "BET"),
        ],
    );

    let volume = Volume::from_bytes(image).unwrap();
    let labels = volume.labels().expect("standard layout");
    assert_eq!(labels.volume.volume_id, "TESTDK");
    assert_eq!(labels.volume.record_length, 128);
    assert!(labels.volume.has_standard_labels());
    assert_eq!(labels.headers.len(), 2);

    // The listing keeps one line per label slot, used slots first here.
    assert_eq!(labels.slot_lines.len(), 19);
    assert!(labels.slot_lines[0].starts_with("HDR1 MYDATA"));
    assert_eq!(labels.slot_lines[2], " ".repeat(80));

    let dir = scratch_dir("extracts-data-sets");
    let extracted = volume.extract_to(&dir).unwrap();
    assert_eq!(extracted.len(), 2);
    assert_eq!(extracted[0].name, "MYDATA");
    assert_eq!(extracted[0].sectors, 3);
    assert_eq!(extracted[1].name, "SECOND");
    assert_eq!(extracted[1].sectors, 2);

    // Artifact names are the data-set name with padding stripped.
    let binary = fs::read(dir.join("MYDATA")).unwrap();
    let text = fs::read_to_string(dir.join("MYDATA.ascii")).unwrap();

    // Raw extent: three whole 128-byte records, blanks and all.
    assert_eq!(binary.len(), 3 * 128);
    let expected_first: Vec<u8> = {
        let mut r = Ebcdic::from_str_lossy("RECORD ONE").as_bytes().to_vec();
        r.resize(128, BLANK);
        r
    };
    assert_eq!(&binary[..128], &expected_first[..]);

    // Text: one line per record, truncated to the declared data length.
    assert_eq!(text, "RECORD ONE\nRECORD TWO\nRECORD 3  \n");

    let second_text = fs::read_to_string(dir.join("SECOND.ascii")).unwrap();
    assert_eq!(second_text, "ALPHA\nBET  \n");

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn extraction_respects_record_length() {
    // Record-length code '1' resolves to 256-byte physical records; the
    // track-0 reservation stays 26 x 128 bytes.
    let headers = vec![hdr1("WIDE", 20, (1, 26), (2, 2))];
    let image = assemble(
        track0(volume_label(Some('1')), headers),
        256,
        2,
        &[
            ((1, 26), "LAST OF TRACK ONE"),
            ((2, 1), "FIRST OF TRACK TWO"),
        ],
    );

    let volume = Volume::from_bytes(image).unwrap();
    assert_eq!(volume.labels().unwrap().volume.record_length, 256);

    let dir = scratch_dir("record-length");
    let extracted = volume.extract_to(&dir).unwrap();
    assert_eq!(extracted.len(), 1);
    assert_eq!(extracted[0].sectors, 2);

    let binary = fs::read(dir.join("WIDE")).unwrap();
    assert_eq!(binary.len(), 2 * 256);
    assert_eq!(
        &binary[..17],
        Ebcdic::from_str_lossy("LAST OF TRACK ONE").as_bytes()
    );
    assert_eq!(
        &binary[256..256 + 18],
        Ebcdic::from_str_lossy("FIRST OF TRACK TWO").as_bytes()
    );

    let text = fs::read_to_string(dir.join("WIDE.ascii")).unwrap();
    assert_eq!(text, "LAST OF TRACK ONE   \nFIRST OF TRACK TWO  \n");

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn incompatible_layout_extracts_nothing() {
    let mut sectors = track0(volume_label(None), vec![hdr1("HIDDEN", 80, (1, 1), (1, 4))]);
    // Data in the reserved sector makes the rest of the track
    // undecodable.
    sectors[3][0] = 0xFF;
    let image = assemble(sectors, 128, 1, &[]);

    let volume = Volume::from_bytes(image).unwrap();
    assert!(volume.track0().reserved.is_present());
    assert!(volume.labels().is_none());

    let dir = scratch_dir("incompatible");
    let extracted = volume.extract_to(&dir).unwrap();
    assert!(extracted.is_empty());
    // No labels means no output directory either.
    assert!(!dir.exists());
}

#[test]
fn existing_output_directory_is_an_error() {
    let image = assemble(
        track0(volume_label(None), vec![hdr1("DATA", 80, (1, 1), (1, 2))]),
        128,
        1,
        &[((1, 1), "X")],
    );
    let volume = Volume::from_bytes(image).unwrap();

    let dir = scratch_dir("dir-conflict");
    fs::create_dir(&dir).unwrap();
    assert!(volume.extract_to(&dir).is_err());
    fs::remove_dir_all(&dir).unwrap();
}
