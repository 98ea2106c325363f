use ascii_donut::renderer::{render_frame, RenderState};
use ascii_donut::{DonutConfig, RenderMode, Renderer};

const GOLDEN_80X22: &str = include_str!("fixtures/golden_80x22.txt");

fn golden_config() -> DonutConfig {
    DonutConfig {
        width: 80,
        height: 22,
        r1: 1.0,
        r2: 2.0,
        k1: 30.0,
        k2: 5.0,
        theta_step: 0.07,
        phi_step: 0.02,
        ..DonutConfig::default()
    }
}

#[test]
fn test_golden_frame_baseline() {
    let renderer = Renderer::new(golden_config());
    assert_eq!(renderer.render_frame(), GOLDEN_80X22);
}

#[test]
fn test_golden_frame_optimized() {
    let config = DonutConfig {
        mode: RenderMode::Optimized,
        ..golden_config()
    };
    assert_eq!(Renderer::new(config).render_frame(), GOLDEN_80X22);
}

#[test]
fn test_golden_frame_free_function() {
    assert_eq!(
        render_frame(&golden_config(), RenderState::default()),
        GOLDEN_80X22
    );
}

#[test]
fn test_golden_frame_shape() {
    let lines: Vec<&str> = GOLDEN_80X22.lines().collect();
    assert_eq!(lines.len(), 22);
    assert!(lines.iter().all(|line| line.len() == 80));
}
