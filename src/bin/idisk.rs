use clap::{App, Arg};
use std::fs;
use std::path::Path;
use std::process;

use diskette::disk::{Extractor, Image, Labels, Track0};

// Possible exit codes
static _EXIT_SUCCESS: i32 = 0;
static EXIT_FAILURE: i32 = 1;

fn main() {
    // Parse command-line arguments
    let matches = App::new("IBM Diskette 1 Utility")
        .version("0.1.0")
        .about("Extract individual data sets from IBM \"Diskette 1\" floppy images.")
        .arg(Arg::with_name("inputfile").required(true))
        .arg(
            Arg::with_name("info")
                .short("i")
                .long("info-only")
                .help("Print only metadata from first track. Do not extract individual files."),
        )
        .get_matches();

    let inputfile = matches.value_of("inputfile").unwrap();

    let image = match Image::open_read_only(inputfile) {
        Ok(image) => image,
        Err(_) => {
            eprintln!("ERROR: CANNOT READ INPUT FILE {}", inputfile);
            process::exit(EXIT_FAILURE);
        }
    };

    let track0 = match Track0::read(&image) {
        Ok(track0) => track0,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(EXIT_FAILURE);
        }
    };

    println!();
    println!("DISK METADATA");
    println!("=============");
    println!();
    println!("IPL / IMPL: {}", track0.ipl);
    println!("System scratch: {}", track0.scratch);
    println!("Data in reserved sector: {}", track0.reserved);

    // The disk layout looks completely different when IPL/IMPL or
    // reserved-sector data is present; nothing further can be decoded.
    let labels = match track0.labels {
        Some(ref labels) => labels,
        None => {
            println!();
            return;
        }
    };

    print_error_map(labels);
    print_volume_label(labels);
    print_data_set_labels(labels);

    if matches.is_present("info") {
        return;
    }

    extract_data_sets(&image, labels, inputfile);
}

/// "blank" for an absent single-character indicator, per the report
/// conventions of the original utility.
fn indicator(c: Option<char>) -> String {
    match c {
        Some(c) => c.to_string(),
        None => "blank".to_string(),
    }
}

fn print_error_map(labels: &Labels) {
    let map = &labels.error_map;
    println!("Label ERMAP: {}", map.label);

    match map.first_defective_cylinder {
        None => println!("Defective cylinders: none"),
        Some(ref first) => {
            println!("First defective cylinder: {}", first);
            if let Some(ref second) = map.second_defective_cylinder {
                println!("Second defective cylinder: {}", second);
                let more = if map.more_defective_cylinders == Some(true) {
                    "Yes"
                } else {
                    "No"
                };
                println!("More defective cylinders: {}", more);
            }
        }
    }

    println!("Diskette defect indicator: {}", indicator(map.defect_indicator));
    println!(
        "Error directory indicator: {}",
        indicator(map.error_directory_indicator)
    );
    if let Some(ref directory) = map.error_directory {
        println!("Error directory: {}", directory);
    }
}

fn print_volume_label(labels: &Labels) {
    let volume = &labels.volume;
    println!();
    println!("Volume label: {}", volume.label);
    println!("Volume identifier: {}", volume.volume_id);
    println!(
        "Volume accessibility field: {}",
        indicator(volume.accessibility)
    );
    println!(
        "Owner identifier field: {}",
        volume.owner_id.as_deref().unwrap_or("blank")
    );
    println!(
        "Volume surface indicator: {}",
        indicator(volume.surface_indicator)
    );
    println!(
        "Extent arrangement indicator: {}",
        indicator(volume.extent_arrangement)
    );
    println!(
        "Special requirements indicator: {}",
        indicator(volume.special_requirements)
    );
    println!(
        "Length of the physical record (sector) on cylinders 1 through 76: {} bytes",
        volume.record_length
    );
    println!(
        "Physical record (sector) sequence code: {} {}",
        volume.sequence_code,
        if volume.is_sequential() {
            "(sequential)"
        } else {
            ""
        }
    );
    println!(
        "Label standard version field: {} {}",
        indicator(volume.label_standard),
        if volume.has_standard_labels() {
            "(IBM standard labels are present)"
        } else {
            ""
        }
    );
}

fn print_data_set_labels(labels: &Labels) {
    println!();
    println!("DATA SET LABELS");
    println!("===============");
    println!();
    println!("LB   ID               LEN  ABOE  PEOE  RBSWEMS CD    RL  OFF      ED    VDEOD   ");
    println!("--------------------------------------------------------------------------------");
    for line in &labels.slot_lines {
        println!("{}", line);
    }
    println!();
}

fn extract_data_sets(image: &Image, labels: &Labels, inputfile: &str) {
    println!("DATA SETS EXTRACTION");
    println!("====================");
    println!();

    // The output directory is named after the input file, extension
    // stripped, and must not already exist.
    let directory = Path::new(inputfile)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(inputfile)
        .to_string();
    if fs::create_dir(&directory).is_err() {
        eprintln!("ERROR: CREATION OF DIRECTORY {} FAILED", directory);
        println!();
        process::exit(EXIT_FAILURE);
    }

    let extractor = Extractor::new(image, labels.volume.record_length);
    for header in &labels.headers {
        match extractor.extract(header, Path::new(&directory)) {
            Ok(extracted) => {
                println!(
                    "-- Saving data set {} ({} sectors) in binary file: {}",
                    extracted.name,
                    extracted.sectors,
                    extracted.binary_path.display()
                );
                println!(
                    "-- Saving ASCII conversion of {} in text file: {}",
                    extracted.name,
                    extracted.text_path.display()
                );
                println!();
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(EXIT_FAILURE);
            }
        }
    }
}
