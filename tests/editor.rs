use framegeo::{Action, Editor, Field, FieldError, InputError, Point, ViewContext, Zoom};
use miette::Diagnostic;

fn set(field: Field, input: &str) -> Action {
    Action::SetField {
        field,
        input: input.to_string(),
    }
}

fn paths(editor: &Editor) -> String {
    editor
        .frame()
        .guides
        .iter()
        .map(|g| g.d.as_str())
        .collect::<Vec<_>>()
        .join(" | ")
}

#[test]
fn reach_guides_in_default_view() {
    let editor = Editor::default().apply(Action::Focus(Field::ReachLen)).unwrap();
    insta::assert_snapshot!(paths(&editor), @"M300 450 L494 450 | M494 178 L494 586");
}

#[test]
fn stack_guides_at_origin() {
    let view = ViewContext::new(Point::ZERO, Zoom::ONE);
    let editor = Editor::new(Default::default(), view)
        .apply(Action::Focus(Field::StackLen))
        .unwrap();
    insta::assert_snapshot!(paths(&editor), @"M0 0 L0 -544 | M388 -544 L-194 -544");
}

#[test]
fn wheelbase_guide_is_rounded() {
    let editor = Editor::default().apply(Action::Focus(Field::WheelbaseLen)).unwrap();
    insta::assert_snapshot!(paths(&editor), @"M591.3 412.5 L85.8 412.5");
}

#[test]
fn editing_reach_moves_the_guide() {
    let editor = Editor::default()
        .apply_all([Action::Focus(Field::ReachLen), set(Field::ReachLen, "40 cm")])
        .unwrap();
    assert_eq!(editor.revision, 2);
    insta::assert_snapshot!(paths(&editor), @"M300 450 L500 450 | M500 178 L500 586");
}

#[test]
fn zoom_and_pan_change_only_the_view() {
    let editor = Editor::default()
        .apply_all([
            Action::Pan(Point::ZERO),
            Action::Zoom(Zoom::try_new(1.0).unwrap()),
            Action::Focus(Field::ReachLen),
        ])
        .unwrap();
    assert_eq!(editor.params, Editor::default().params);
    insta::assert_snapshot!(paths(&editor), @"M0 0 L388 0 | M388 -544 L388 272");
}

#[test]
fn infeasible_bb_drop_flags_chainstay() {
    let editor = Editor::default()
        .apply_all([set(Field::BbDropLen, "500"), Action::Focus(Field::ChainstayLen)])
        .unwrap();
    let frame = editor.frame();
    assert_eq!(frame.resolved.errors.get(&Field::ChainstayLen), Some(&FieldError::TooShort));
    assert_eq!(frame.resolved.errors.len(), 1);
    // rear hub is NaN, so there is nothing to draw
    assert!(frame.guides.is_empty());
}

#[test]
fn short_top_tube_is_reported() {
    let mut params = framegeo::FrameParams::default();
    params.top_tube_len = 300.0;
    let editor = Editor::default()
        .apply(Action::LoadTemplate(framegeo::Template::new("short", params)))
        .unwrap();
    let errors = editor.frame().resolved.errors;
    assert_eq!(errors.get(&Field::TopTubeLen).map(|e| e.to_string()).as_deref(), Some("too short"));
}

#[test]
fn unit_mismatch_has_help() {
    let err = Editor::default()
        .apply(set(Field::SeatTubeAngle, "74 in"))
        .unwrap_err();
    assert!(matches!(err, InputError::UnitMismatch { .. }));
    assert_eq!(err.help().map(|h| h.to_string()).as_deref(), Some("use degrees"));
    assert_eq!(
        err.code().map(|c| c.to_string()).as_deref(),
        Some("framegeo::input::unit_mismatch")
    );
}

#[test]
fn read_only_top_tube_rejects_edits() {
    let err = Editor::default().apply(set(Field::TopTubeLen, "560")).unwrap_err();
    assert_eq!(err.to_string(), "topTubeLen is read-only");
}
