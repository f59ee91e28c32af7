use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use stock_monitor::domain::chart::{ChartSpec, ColorToken, render};

const WIDTH: f64 = 300.0;
const HEIGHT: f64 = 100.0;
const EPS: f64 = 1e-6;

fn bounded(raw: Vec<i32>) -> Vec<f64> {
    raw.into_iter().map(|v| v as f64 / 100.0).collect()
}

#[test]
fn worked_example_matches_expected_points() {
    let geometry = render(&[10.0, 12.0, 8.0, 15.0], WIDTH, HEIGHT).unwrap();
    let xs: Vec<f64> = geometry.points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = geometry.points.iter().map(|p| p.y).collect();

    assert_eq!(xs, vec![0.0, 100.0, 200.0, 300.0]);
    for (actual, expected) in ys.iter().zip([71.43, 42.86, 100.0, 0.0]) {
        assert!((actual - expected).abs() < 0.01, "{actual} vs {expected}");
    }
    assert_eq!(geometry.min_value, 8.0);
    assert_eq!(geometry.max_value, 15.0);
}

#[test]
fn chart_rejects_unusable_dimensions() {
    assert!(ChartSpec::new(vec![1.0, 2.0], 0.0, HEIGHT, ColorToken::default()).is_err());
    assert!(ChartSpec::new(vec![1.0, f64::NAN], WIDTH, HEIGHT, ColorToken::default()).is_err());
    let spec = ChartSpec::new(vec![1.0, 2.0], WIDTH, HEIGHT, ColorToken::default()).unwrap();
    assert_eq!(spec.render().unwrap().segments.len(), 1);
}

#[quickcheck]
fn short_series_draws_nothing(value: Option<i32>) -> bool {
    let series: Vec<f64> = value.into_iter().map(f64::from).collect();
    render(&series, WIDTH, HEIGHT).is_none()
}

#[quickcheck]
fn extremes_touch_top_and_bottom(raw: Vec<i32>) -> TestResult {
    let series = bounded(raw);
    let Some(geometry) = render(&series, WIDTH, HEIGHT) else {
        return TestResult::discard();
    };
    let ys: Vec<f64> = geometry.points.iter().map(|p| p.y).collect();

    let in_bounds = ys.iter().all(|y| (-EPS..=HEIGHT + EPS).contains(y));
    let (min, max) = (geometry.min_value, geometry.max_value);
    let ok = if min == max {
        ys.iter().all(|y| (y - HEIGHT).abs() < EPS)
    } else {
        series.iter().zip(&ys).all(|(v, y)| {
            (*v != max || y.abs() < EPS) && (*v != min || (y - HEIGHT).abs() < EPS)
        })
    };
    TestResult::from_bool(in_bounds && ok)
}

#[quickcheck]
fn x_spans_width_monotonically(raw: Vec<i32>) -> TestResult {
    let series = bounded(raw);
    let Some(geometry) = render(&series, WIDTH, HEIGHT) else {
        return TestResult::discard();
    };
    let xs: Vec<f64> = geometry.points.iter().map(|p| p.x).collect();
    let monotonic = xs.windows(2).all(|w| w[0] <= w[1]);
    let first = xs.first().copied().unwrap_or(f64::NAN);
    let last = xs.last().copied().unwrap_or(f64::NAN);
    TestResult::from_bool(monotonic && first == 0.0 && (last - WIDTH).abs() < EPS)
}

#[quickcheck]
fn segments_connect_consecutive_points(raw: Vec<i32>) -> TestResult {
    let series = bounded(raw);
    let Some(geometry) = render(&series, WIDTH, HEIGHT) else {
        return TestResult::discard();
    };
    if geometry.segments.len() != series.len() - 1 {
        return TestResult::failed();
    }
    let ok = geometry.segments.iter().zip(geometry.points.windows(2)).all(|(segment, pair)| {
        let end = segment.projected_end();
        segment.start == pair[0]
            && (segment.length - pair[0].distance_to(&pair[1])).abs() < 1e-6
            && (end.x - pair[1].x).abs() < 1e-6
            && (end.y - pair[1].y).abs() < 1e-6
    });
    TestResult::from_bool(ok)
}
