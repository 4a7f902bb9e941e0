use gridcorr::kernel::laplace4;
use gridcorr::post::{abs, count_nonzero, edge_mask, normalize_to_u8, threshold};
use gridcorr::{apply, apply_rows, Anchor, EdgeConfig, EdgeDetector, Grid, Kernel};
use serde::Deserialize;

const CASES_JSON: &str = include_str!("data/edge_cases.json");

#[derive(Debug, Deserialize)]
struct CaseFile {
    cases: Vec<Case>,
}

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    kernel: Vec<Vec<i32>>,
    #[serde(default)]
    anchor: Option<[usize; 2]>,
    grid: Vec<Vec<u8>>,
    threshold: i64,
    response: Vec<Vec<i64>>,
    mask: Vec<Vec<u8>>,
}

impl Case {
    fn kernel(&self) -> Kernel<i32> {
        let kernel = Kernel::from_rows(&self.kernel).unwrap();
        match self.anchor {
            Some([row, column]) => kernel.with_anchor(Anchor::new(row, column)).unwrap(),
            None => kernel,
        }
    }
}

fn flatten<T: Copy>(rows: &[Vec<T>]) -> Vec<T> {
    rows.iter().flatten().copied().collect()
}

#[test]
fn fixture_cases_match_hand_computation() {
    let file: CaseFile = serde_json::from_str(CASES_JSON).unwrap();
    assert!(!file.cases.is_empty());

    for case in &file.cases {
        let kernel = case.kernel();
        let response = apply_rows(&kernel, &case.grid).unwrap();
        assert_eq!(response.data(), flatten(&case.response), "{}", case.name);

        let grid = Grid::from_rows(&case.grid).unwrap();
        let detector = EdgeDetector::new(kernel).with_config(EdgeConfig {
            threshold: Some(case.threshold),
            ..EdgeConfig::default()
        });
        let mask = detector.detect_mask(grid.view()).unwrap();
        assert_eq!(mask.data(), flatten(&case.mask), "{}", case.name);
    }
}

#[test]
fn abs_and_threshold_build_edge_map() {
    let rows = [[0u8, 0, 0, 0], [0, 5, 5, 0], [0, 5, 5, 0], [0, 0, 0, 0]];
    let grid = Grid::from_rows(&rows).unwrap();
    let response = apply(&laplace4(), grid.view());

    let magnitude = abs(&response);
    assert!(magnitude.data().iter().all(|&v| v >= 0));

    let edges = threshold(&magnitude, 10);
    assert_eq!(count_nonzero(&edges), 4);
    assert_eq!(edges.get(1, 1).copied(), Some(10));

    let strict = threshold(&magnitude, 11);
    assert_eq!(count_nonzero(&strict), 0);

    let mask = edge_mask(&response, 10);
    let from_threshold = edges.map(|&v| if v == 0 { 0u8 } else { 255 });
    assert_eq!(mask, from_threshold);
}

#[test]
fn detector_detect_equals_manual_pipeline() {
    let mut data = vec![20u8; 12 * 9];
    for y in 3..6 {
        for x in 4..9 {
            data[y * 12 + x] = 200;
        }
    }
    let grid = Grid::from_vec(data, 12, 9).unwrap();
    let detector = EdgeDetector::new(laplace4()).with_config(EdgeConfig {
        threshold: Some(50),
        parallel: true,
    });

    let detected = detector.detect(grid.view()).unwrap();
    let manual = threshold(&abs(&apply(&laplace4(), grid.view())), 50);
    assert_eq!(detected, manual);
    assert!(count_nonzero(&detected) > 0);
    assert_eq!(
        detector.magnitude(grid.view()),
        abs(&detector.response(grid.view()))
    );
}

#[test]
fn normalized_response_spans_full_range() {
    let grid = Grid::from_rows(&[[0u8, 0, 0], [0, 8, 0], [0, 0, 0], [0, 0, 0]]).unwrap();
    let response = apply(&laplace4(), grid.view());
    let image = normalize_to_u8(&response);
    assert_eq!(image.get(1, 1).copied(), Some(0));
    assert_eq!(image.get(1, 2).copied(), Some(255));
    assert_eq!(image.width(), 3);
}
