//! Runs the dataset's `testpo` reference rows through the reader, the way
//! the JPL self-check procedure prescribes.

mod common;

use approx::assert_relative_eq;

use orrery::jpl_de::de_version::DeVersion;
use orrery::jpl_de::reader::DeReader;
use orrery::jpl_de::testpo::{body_for_code, parse_testpo, testpo_path};

#[test]
fn test_reader_reproduces_reference_rows() {
    let (_dir, path) = common::dataset_dir();
    common::write_dataset(&path);
    common::write_testpo(&path);

    let reader = DeReader::new(&path, DeVersion::DE421).unwrap();
    let cases = parse_testpo(&testpo_path(&path, DeVersion::DE421)).unwrap();
    assert_eq!(cases.len(), 36);

    for case in cases {
        assert_eq!(case.denum, 421);
        let target = body_for_code(case.target).unwrap();
        let center = body_for_code(case.center).unwrap();
        let state = reader
            .position_relative(center, target, case.jde)
            .unwrap();

        let got = match case.coordinate {
            1 => state.position.x,
            2 => state.position.y,
            3 => state.position.z,
            4 => state.velocity.x,
            5 => state.velocity.y,
            6 => state.velocity.z,
            other => panic!("coordinate {other} out of range"),
        };
        assert_relative_eq!(got, case.value, max_relative = 1e-13);
    }
}
