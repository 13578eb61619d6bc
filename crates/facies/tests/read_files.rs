//! Integration tests for reading single output files

use ftools_facies::{read_facies_file, Dimensions, Error, FaciesReader};
use rstest::{fixture, rstest};
use std::path::Path;

#[fixture]
fn cube() -> Dimensions {
    Dimensions::new(2, 2, 2)
}

#[rstest]
#[case("./data/cube_2x2x2.out", b',')] // case 1
#[case("./data/cube_rows_2x2x2.out", b',')] // case 2
#[case("./data/cube_spaced_2x2x2.out", b' ')] // case 3
fn read_cube_layouts(cube: Dimensions, #[case] path: &str, #[case] delimiter: u8) {
    let mut reader = FaciesReader::new();
    reader.set_dimensions(cube);
    reader.set_delimiter(delimiter);

    let file = reader.read(Path::new(path)).unwrap();
    assert_eq!(file.table().codes(), &[0, 1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(file.volume().codes(), &[7, 3, 5, 1, 6, 2, 4, 0]);
}

#[rstest]
fn read_cube_derived_forms(cube: Dimensions) {
    let file = read_facies_file("./data/cube_2x2x2.out", cube).unwrap();

    assert_eq!(file.case_id, "cube_2x2x2");
    assert_eq!(file.header.title, "TI (2x2x2)");
    assert_eq!(file.header.variables, Some(1));
    assert_eq!(file.header.grid_hint, Some(cube));

    assert_eq!(file.flattened().values(), &[7, 3, 5, 1, 6, 2, 4, 0]);

    let record = file.labeled_record();
    assert_eq!(record.case_id, "cube_2x2x2");
    assert_eq!(record.shape(), [2, 2, 2]);
    assert_eq!(record.codes(), &[7, 6, 5, 4, 3, 2, 1, 0]);
}

#[rstest]
fn read_uneven_grid() {
    let dimensions = Dimensions::new(4, 3, 2);
    let file = read_facies_file("./data/grid_4x3x2.out", dimensions).unwrap();
    let volume = file.volume();

    assert_eq!(volume.len(), 24);
    assert_eq!(volume.unique_codes(), vec![0, 1, 2]);
    assert_eq!(volume.histogram().values().sum::<usize>(), 24);

    for z in 1..=2 {
        let slice = volume.extract_slice(z).unwrap();
        assert_eq!((slice.nx, slice.ny), (4, 3));
        assert_eq!(slice.codes().len(), 12);
    }

    assert_eq!(file.volume().to_raw_table(), *file.table());
}

#[rstest]
#[case(Dimensions::new(2, 2, 3), 12, 8)] // case 1
#[case(Dimensions::new(1, 2, 2), 4, 8)] // case 2
fn wrong_dimensions(#[case] dimensions: Dimensions, #[case] expected: usize, #[case] found: usize) {
    match read_facies_file("./data/cube_2x2x2.out", dimensions) {
        Err(Error::ShapeMismatch {
            expected: e,
            found: f,
            ..
        }) => assert_eq!((e, f), (expected, found)),
        other => panic!("expected a shape mismatch, got {other:?}"),
    }
}

#[rstest]
fn non_integer_code(cube: Dimensions) {
    let error = read_facies_file("./data/bad_code.out", cube).unwrap_err();
    assert_eq!(error.kind(), "FileFormat");
    assert!(error.to_string().contains("\"shale\""));
    assert!(error.to_string().contains("line 7"));
}

#[rstest]
fn missing_header_lines(cube: Dimensions) {
    let error = read_facies_file("./data/header_only.out", cube).unwrap_err();
    assert_eq!(error.kind(), "FileFormat");
    assert!(error.to_string().contains("found 2"));
}

#[rstest]
fn missing_file(cube: Dimensions) {
    let error = read_facies_file("./data/not_a_file.out", cube).unwrap_err();
    assert!(matches!(error, Error::Io(_)));
}
