//! Integration tests for the guard semantics of the partial renderer

use std::cell::Cell;

use pretty_assertions::assert_eq;
use serde::Serialize;

use partial_guard::{
    ContextScope, PartialRenderer, Rendered, RenderError, ViewData, ViewEngine, ViewLocation,
};

#[derive(Debug, Clone, Serialize)]
struct Fragment {
    title: String,
    text: String,
}

fn fragment(title: &str, text: &str) -> Fragment {
    Fragment {
        title: title.to_string(),
        text: text.to_string(),
    }
}

fn engine() -> ViewEngine {
    ViewEngine::new(vec![ViewLocation::memory(
        "builtin",
        [
            (
                "probe",
                "{% if model is none %}NULL{% else %}VALUE{% endif %}",
            ),
            (
                "fragment",
                "{% if model is none %}The fragment is null!\
                 {% else %}<h2>{{ model.title }}</h2><p>{{ model.text }}</p>{% endif %}",
            ),
            (
                "fragment_list",
                "{{ model | length }}:{% for f in model %}\
                 [{% if f is none %}null{% else %}{{ f.title }}{% endif %}]{% endfor %}",
            ),
            ("greeting", "Hello {{ greeting }}!"),
        ],
    )])
}

#[test]
fn test_or_null_passes_null_model_through_as_none() {
    let engine = engine();
    let mut ambient = ViewData::new();
    // The ambient bag deliberately carries a model; the explicit null must win.
    ambient.insert("model", "ambient fallback");
    let partials = PartialRenderer::new(&engine).with_ambient(ambient);

    let html = partials
        .partial_or_null::<Fragment>("probe", None, ContextScope::Ambient)
        .expect("Should render");
    assert_eq!(html, "NULL");
}

#[test]
fn test_or_null_with_override_scope_still_passes_none() {
    let engine = engine();
    let partials = PartialRenderer::new(&engine);

    let mut override_data = ViewData::new();
    override_data.insert("model", "override fallback");

    let html = partials
        .partial_or_null::<Fragment>("probe", None, ContextScope::Override(&override_data))
        .expect("Should render");
    assert_eq!(html, "NULL");
}

#[test]
fn test_or_null_with_model_matches_standard_partial() {
    let engine = engine();
    let partials = PartialRenderer::new(&engine);
    let model = fragment("Title", "Body");

    let standard = partials
        .partial("fragment", &model, ContextScope::Ambient)
        .expect("Should render");
    let guarded = partials
        .partial_or_null("fragment", Some(&model), ContextScope::Ambient)
        .expect("Should render");
    assert_eq!(guarded, standard);
    assert_eq!(standard, "<h2>Title</h2><p>Body</p>");
}

#[test]
fn test_or_discard_with_null_model_produces_no_output() {
    let engine = engine();
    let partials = PartialRenderer::new(&engine);

    let rendered = partials
        .partial_or_discard::<Fragment>("fragment", None, ContextScope::Ambient)
        .expect("Should not error");
    assert_eq!(rendered, Rendered::Suppressed);
}

#[test]
fn test_or_discard_with_model_matches_standard_partial() {
    let engine = engine();
    let partials = PartialRenderer::new(&engine);
    let model = fragment("Title", "Body");

    let standard = partials
        .partial("fragment", &model, ContextScope::Ambient)
        .expect("Should render");
    let rendered = partials
        .partial_or_discard("fragment", Some(&model), ContextScope::Ambient)
        .expect("Should render");
    assert_eq!(rendered, Rendered::Content(standard));
}

#[test]
fn test_if_empty_treats_null_and_empty_sequences_alike() {
    let engine = engine();
    let partials = PartialRenderer::new(&engine);

    let absent = partials
        .partial_or_discard_if_empty::<Fragment>("fragment_list", None, ContextScope::Ambient)
        .expect("Should not error");
    assert_eq!(absent, Rendered::Suppressed);

    let empty: Vec<Fragment> = Vec::new();
    let zero_length = partials
        .partial_or_discard_if_empty("fragment_list", Some(&empty[..]), ContextScope::Ambient)
        .expect("Should not error");
    assert_eq!(zero_length, Rendered::Suppressed);
}

#[test]
fn test_if_empty_passes_null_entries_through_unfiltered() {
    let engine = engine();
    let partials = PartialRenderer::new(&engine);

    // Two elements, one null: non-empty, and nothing gets filtered out.
    let items: Vec<Option<Fragment>> = vec![Some(fragment("First", "a")), None];
    let rendered = partials
        .partial_or_discard_if_empty("fragment_list", Some(&items[..]), ContextScope::Ambient)
        .expect("Should render");
    assert_eq!(rendered, Rendered::Content("2:[First][null]".to_string()));
}

#[test]
fn test_if_empty_with_single_null_entry_is_non_empty() {
    let engine = engine();
    let partials = PartialRenderer::new(&engine);

    let items: Vec<Option<Fragment>> = vec![None];
    let rendered = partials
        .partial_or_discard_if_empty("fragment_list", Some(&items[..]), ContextScope::Ambient)
        .expect("Should render");
    assert_eq!(rendered, Rendered::Content("1:[null]".to_string()));
}

#[test]
fn test_wrapper_receives_the_full_partial_output() {
    let engine = engine();
    let partials = PartialRenderer::new(&engine);
    let model = fragment("Title", "Body");

    let expected_inner = partials
        .partial("fragment", &model, ContextScope::Ambient)
        .expect("Should render");

    let seen = expected_inner.clone();
    let rendered = partials
        .partial_or_discard_with(
            "fragment",
            Some(&model),
            move |inner| {
                // The partial is fully rendered before the wrapper runs.
                assert_eq!(inner, seen);
                Ok(format!("<div>{}</div>", inner))
            },
            ContextScope::Ambient,
        )
        .expect("Should render");

    assert_eq!(
        rendered,
        Rendered::Content(format!("<div>{}</div>", expected_inner))
    );
}

#[test]
fn test_wrapper_not_invoked_when_model_absent() {
    let engine = engine();
    let partials = PartialRenderer::new(&engine);
    let called = Cell::new(false);

    let rendered = partials
        .partial_or_discard_with::<Fragment, _>(
            "fragment",
            None,
            |inner| {
                called.set(true);
                Ok(inner)
            },
            ContextScope::Ambient,
        )
        .expect("Should not error");

    assert_eq!(rendered, Rendered::Suppressed);
    assert!(!called.get(), "Wrapper must not run for an absent model");
}

#[test]
fn test_wrapper_not_invoked_when_sequence_empty() {
    let engine = engine();
    let partials = PartialRenderer::new(&engine);
    let called = Cell::new(false);

    let empty: Vec<Fragment> = Vec::new();
    let rendered = partials
        .partial_or_discard_if_empty_with(
            "fragment_list",
            Some(&empty[..]),
            |inner| {
                called.set(true);
                Ok(inner)
            },
            ContextScope::Ambient,
        )
        .expect("Should not error");

    assert_eq!(rendered, Rendered::Suppressed);
    assert!(!called.get(), "Wrapper must not run for an empty sequence");
}

#[test]
fn test_if_empty_wrapped_renders_partial_then_wrapper() {
    let engine = engine();
    let partials = PartialRenderer::new(&engine);

    let items: Vec<Option<Fragment>> = vec![Some(fragment("Only", "x"))];
    let rendered = partials
        .partial_or_discard_if_empty_with(
            "fragment_list",
            Some(&items[..]),
            |inner| Ok(format!("<ul>{}</ul>", inner)),
            ContextScope::Ambient,
        )
        .expect("Should render");

    assert_eq!(rendered, Rendered::Content("<ul>1:[Only]</ul>".to_string()));
}

#[test]
fn test_named_fragment_scenario() {
    // Template name "Fragment", model null: or-null renders the null branch,
    // or-discard renders nothing.
    let engine = ViewEngine::new(vec![ViewLocation::memory(
        "builtin",
        [(
            "Fragment",
            "{% if model is none %}The fragment is null!{% else %}{{ model.title }}{% endif %}",
        )],
    )]);
    let partials = PartialRenderer::new(&engine);

    let html = partials
        .partial_or_null::<Fragment>("Fragment", None, ContextScope::Ambient)
        .expect("Should render");
    assert_eq!(html, "The fragment is null!");

    let rendered = partials
        .partial_or_discard::<Fragment>("Fragment", None, ContextScope::Ambient)
        .expect("Should not error");
    assert_eq!(rendered, Rendered::Suppressed);
}

#[test]
fn test_empty_template_name_is_invalid_argument() {
    // An engine with no locations at all: a blank name must fail before any
    // resolution is attempted, so no not-found error can be produced.
    let engine = ViewEngine::new(vec![]);
    let partials = PartialRenderer::new(&engine);

    let result = partials.partial_or_null::<Fragment>("", None, ContextScope::Ambient);
    assert!(matches!(result, Err(RenderError::EmptyTemplateName)));

    let result = partials.partial_or_null::<Fragment>("   ", None, ContextScope::Ambient);
    assert!(matches!(result, Err(RenderError::EmptyTemplateName)));
}

#[test]
fn test_missing_template_error_lists_searched_locations() {
    let engine = ViewEngine::new(vec![
        ViewLocation::memory("first", [("present", "")]),
        ViewLocation::memory("second", [("present", "")]),
    ]);
    let partials = PartialRenderer::new(&engine);

    let err = partials
        .partial("Missing", &(), ContextScope::Ambient)
        .expect_err("Should fail to resolve");

    let message = err.to_string();
    assert!(message.contains("'Missing'"));
    assert!(message.contains("first:Missing"));
    assert!(message.contains("second:Missing"));
}

#[test]
fn test_override_scope_applies_to_a_single_call() {
    let engine = engine();
    let mut ambient = ViewData::new();
    ambient.insert("greeting", "ambient");
    let partials = PartialRenderer::new(&engine).with_ambient(ambient);

    let mut override_data = ViewData::new();
    override_data.insert("greeting", "override");

    let html = partials
        .partial_with_ambient("greeting", ContextScope::Override(&override_data))
        .expect("Should render");
    assert_eq!(html, "Hello override!");

    // The ambient bag is untouched by the override.
    let html = partials
        .partial_with_ambient("greeting", ContextScope::Ambient)
        .expect("Should render");
    assert_eq!(html, "Hello ambient!");
}

#[test]
fn test_wrap_passes_item_through_without_re_encoding() {
    let engine = ViewEngine::new(vec![ViewLocation::memory(
        "builtin",
        [("box", "<div class=\"box\">{{ item }}</div>")],
    )]);
    let partials = PartialRenderer::new(&engine);

    let html = partials
        .wrap("box", "<p>already encoded</p>".to_string())
        .expect("Should render");
    assert_eq!(html, "<div class=\"box\"><p>already encoded</p></div>");
}
