// End-to-end conversion of CyHair files written to disk
use byteorder::{LittleEndian, WriteBytesExt};
use glam::Vec3;
use hair_curves::cyhair::{CyHairHeader, FLAG_POINTS, FLAG_SEGMENTS};
use hair_curves::{convert_file, ConversionConfig, CyHairFile, HairError, OutputTarget};

/// Single strand, 4 points, no optional arrays, default thickness 0.1
fn four_point_file_bytes() -> Vec<u8> {
    let mut bytes = Vec::new();
    let mut header = CyHairHeader {
        num_strands: 1,
        total_points: 4,
        flags: FLAG_POINTS,
        default_segments: 3,
        default_thickness: 0.1,
        ..Default::default()
    };
    header.set_info_text("four point strand");
    header.write(&mut bytes).unwrap();
    for p in [[0.0f32, 0.0, 0.0], [0.0, 0.0, 1.0], [0.5, 0.0, 2.0], [1.0, 0.5, 3.0]] {
        for c in p {
            bytes.write_f32::<LittleEndian>(c).unwrap();
        }
    }
    bytes
}

fn records(text: &str) -> Vec<&str> {
    text.lines().filter(|l| l.starts_with("Shape \"curve\"")).collect()
}

#[test]
fn test_single_strand_single_curve() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("strand.hair");
    let output = dir.path().join("strand.pbrt");
    std::fs::write(&input, four_point_file_bytes()).unwrap();

    let summary = convert_file(&input, &OutputTarget::File(output.clone()), &ConversionConfig::default())
        .expect("conversion failed");
    assert_eq!(summary.curves, 1);
    assert_eq!(summary.strands_in_file, 1);

    let text = std::fs::read_to_string(&output).unwrap();
    let records = records(&text);
    assert_eq!(records.len(), 1);
    assert!(records[0].contains("\"string type\" [ \"cylinder\" ]"));
    assert!(records[0].ends_with("\"float width0\" [ 0.100000 ] \"float width1\" [ 0.100000 ]"));

    // 12 coordinates between the point brackets
    let start = records[0].find("\"point P\" [").unwrap() + "\"point P\" [".len();
    let end = records[0][start..].find(']').unwrap() + start;
    let coords: Vec<f32> = records[0][start..end]
        .split_whitespace()
        .map(|v| v.parse().unwrap())
        .collect();
    assert_eq!(coords.len(), 12);
    // Root of the curve is the first point, Y-up
    assert_eq!(&coords[0..3], &[0.0, 0.0, 0.0]);
    // Curve ends at the second point, file z becomes y
    assert_eq!(&coords[9..12], &[0.0, 1.0, 0.0]);
}

#[test]
fn test_bad_magic_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.hair");
    let output = dir.path().join("broken.pbrt");
    let mut bytes = four_point_file_bytes();
    bytes[0..4].copy_from_slice(b"RIAH");
    std::fs::write(&input, bytes).unwrap();

    let err = convert_file(&input, &OutputTarget::File(output.clone()), &ConversionConfig::default())
        .unwrap_err();
    assert!(format!("{:#}", err).contains("broken.hair"));
    assert!(matches!(err.downcast_ref::<HairError>(), Some(HairError::BadMagic { .. })));
    assert!(!output.exists());
}

#[test]
fn test_missing_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.pbrt");
    let result = convert_file(
        &dir.path().join("nope.hair"),
        &OutputTarget::File(output.clone()),
        &ConversionConfig::default(),
    );
    assert!(result.is_err());
    assert!(!output.exists());
}

#[test]
fn test_empty_file_is_conversion_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.hair");
    let output = dir.path().join("empty.pbrt");
    std::fs::write(&input, CyHairFile::from_strands(&[], 0.1).to_bytes()).unwrap();

    let err = convert_file(&input, &OutputTarget::File(output.clone()), &ConversionConfig::default())
        .unwrap_err();
    assert!(matches!(err.downcast_ref::<HairError>(), Some(HairError::EmptyInput)));
    assert!(!output.exists());
}

#[test]
fn test_user_thickness_and_lod_through_config() {
    let strands: Vec<Vec<Vec3>> = (0..6)
        .map(|s| {
            (0..8)
                .map(|i| Vec3::new(s as f32 * 0.1, i as f32 * 0.5, 0.0))
                .collect()
        })
        .collect();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tuft.hair");
    std::fs::write(&input, CyHairFile::from_strands(&strands, 0.01).to_bytes()).unwrap();

    let plain_out = dir.path().join("plain.pbrt");
    let config = ConversionConfig { thickness: Some(0.05), ..Default::default() };
    let summary = convert_file(&input, &OutputTarget::File(plain_out.clone()), &config).unwrap();
    assert_eq!(summary.curves, 6 * 5);
    let text = std::fs::read_to_string(&plain_out).unwrap();
    assert!(text.contains("user_thickness = 0.050000"));
    assert!(records(&text)
        .iter()
        .all(|r| r.ends_with("\"float width0\" [ 0.050000 ] \"float width1\" [ 0.050000 ]")));

    let lod_out = dir.path().join("lod.pbrt");
    let config = ConversionConfig { lod_level: 1, ..Default::default() };
    let summary = convert_file(&input, &OutputTarget::File(lod_out.clone()), &config).unwrap();
    // All roots lie within 0.5 of each other: one merged hair of 5 curves
    assert_eq!(summary.curves, 5);
    assert_eq!(records(&std::fs::read_to_string(&lod_out).unwrap()).len(), 5);
}

#[test]
fn test_oversized_header_counts_fail_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("huge.pbrt");
    let headers = [
        CyHairHeader {
            num_strands: 1,
            total_points: u32::MAX,
            flags: FLAG_POINTS,
            default_segments: 1,
            ..Default::default()
        },
        CyHairHeader {
            num_strands: u32::MAX,
            total_points: 1,
            flags: FLAG_POINTS | FLAG_SEGMENTS,
            ..Default::default()
        },
    ];
    for (i, header) in headers.iter().enumerate() {
        let input = dir.path().join(format!("huge_{}.hair", i));
        let mut bytes = Vec::new();
        header.write(&mut bytes).unwrap();
        bytes.write_f32::<LittleEndian>(1.0).unwrap();
        std::fs::write(&input, bytes).unwrap();

        let err = convert_file(&input, &OutputTarget::File(output.clone()), &ConversionConfig::default())
            .unwrap_err();
        assert!(format!("{:#}", err).contains(&format!("huge_{}.hair", i)));
        assert!(matches!(err.downcast_ref::<HairError>(), Some(HairError::ShortRead { .. })));
        assert!(!output.exists());
    }
}

#[test]
fn test_invalid_max_radius_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("strand.hair");
    let output = dir.path().join("strand.pbrt");
    std::fs::write(&input, four_point_file_bytes()).unwrap();

    let mut config = ConversionConfig { lod_level: 1, ..Default::default() };
    config.lod.max_radius = -1.0;
    assert!(convert_file(&input, &OutputTarget::File(output.clone()), &config).is_err());
    assert!(!output.exists());
}
