use rstest::rstest;
use scene_core::{EvaluationSet, Highlight, StepAction, ViewerState, render, scene_image_url};
use serde_json::json;

fn evaluation_set(ground_truths: &[serde_json::Value]) -> EvaluationSet {
    let records: Vec<_> = ground_truths
        .iter()
        .map(|gt| {
            json!({
                "block": "block1",
                "test": "t1",
                "ground_truth": gt,
                "plausibility": 0.5,
                "complexity": 5,
                "occluder": true,
                "num_objects": 2
            })
        })
        .collect();
    EvaluationSet::from_json_str(&serde_json::Value::Array(records).to_string()).unwrap()
}

fn at_step(step: u32) -> ViewerState {
    ViewerState::default().dispatch(StepAction::Set(step))
}

#[test]
fn first_scene_url_at_step_three() {
    let set = evaluation_set(&[json!(1)]);
    let view = render(&set, &at_step(3), "https://x/");
    assert_eq!(
        view.scenes[0].image_url,
        "https://x/block1/t1/1/scene/scene_3.png"
    );
}

#[rstest]
#[case(json!("0"), Highlight::Implausible)]
#[case(json!(0), Highlight::Implausible)]
#[case(json!("1"), Highlight::Neutral)]
#[case(json!(1), Highlight::Neutral)]
#[case(json!("not a number"), Highlight::Neutral)]
#[case(json!([0]), Highlight::Neutral)]
#[case(json!({"label": 0}), Highlight::Neutral)]
fn ground_truth_selects_border(#[case] ground_truth: serde_json::Value, #[case] expected: Highlight) {
    let set = evaluation_set(&[ground_truth]);
    let view = render(&set, &at_step(0), "");
    assert_eq!(view.scenes[0].highlight, expected);
    assert_eq!(view.scenes[0].border, expected.border());
}

#[test]
fn every_url_follows_the_bucket_layout() {
    let set = evaluation_set(&[json!(0), json!(1), json!(1)]);
    for step in [0, 7, 20] {
        let view = render(&set, &at_step(step), "s3://b/");
        for scene in &view.scenes {
            assert_eq!(
                scene.image_url,
                scene_image_url("s3://b/", "block1", "t1", scene.scene, step)
            );
        }
    }
}

#[test]
fn changing_step_only_changes_trailing_segment() {
    let set = evaluation_set(&[json!(0), json!(1), json!("x")]);
    let before = render(&set, &at_step(2), "https://x/");
    let after = render(&set, &at_step(11), "https://x/");

    assert_eq!(before.banner, after.banner);
    assert_eq!(before.scenes.len(), after.scenes.len());
    for (a, b) in before.scenes.iter().zip(&after.scenes) {
        assert_eq!(
            a.image_url.strip_suffix("scene_2.png"),
            b.image_url.strip_suffix("scene_11.png")
        );
        assert_eq!(a.scene, b.scene);
        assert_eq!(a.label, b.label);
        assert_eq!(a.highlight, b.highlight);
        assert_eq!(a.annotation, b.annotation);
    }
}

#[test]
fn shared_metadata_banner_is_rendered_once() {
    let set = evaluation_set(&[json!(0), json!(1), json!(1)]);
    let view = render(&set, &at_step(0), "");
    assert_eq!(view.banner.complexity, 5);
    assert!(view.banner.occluder);
    assert_eq!(view.banner.num_objects, 2);

    let json = serde_json::to_value(&view).unwrap();
    let text = json.to_string();
    assert_eq!(text.matches("\"complexity\"").count(), 1);
    assert_eq!(text.matches("\"num_objects\"").count(), 1);
}

#[test]
fn empty_input_is_an_explicit_error() {
    assert!(EvaluationSet::from_json_str("[]").is_err());
}
