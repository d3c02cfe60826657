
use project_showcase::{
    entities::project::{ListEntry, ListType, Project, ProjectInsert},
    errors::FieldError,
    validation::validate_project,
};
use serde_json::json;
use test_utils::*;

fn rejected_fields(value: serde_json::Value) -> Vec<String> {
    validate_project(draft(value))
        .expect_err("candidate should be rejected")
        .into_iter()
        .map(|FieldError { field, .. }| field)
        .collect()
}

#[test]
fn valid_candidate_is_accepted_and_normalized() {
    let mut body = valid_project_json();
    body["website_name"] = json!("   Portfolio   ");
    body["overview"]["links"][0]["url"] = json!("  https://x.com  ");

    let project: ProjectInsert = validate_project(draft(body)).unwrap();

    assert_eq!(project.website_name, "Portfolio");
    assert_eq!(project.overview.links[0].url, "https://x.com");
    assert_eq!(project.overview.project_infos[0].list_type, ListType::Horizontal);
    assert_eq!(project.overview.project_infos[1].list_type, ListType::Vertical);
    assert!(matches!(project.overview.project_infos[1].lists[1], ListEntry::Links(ref links) if links.len() == 2));
    assert_eq!(project.images_url.len(), 2);
}

#[test]
fn every_missing_required_field_is_reported() {
    let fields = rejected_fields(json!({}));

    assert_eq!(
        fields,
        vec!["website_name", "website_type", "scroll_image_url", "overview", "images_url"]
    );
}

#[test]
fn whitespace_only_strings_fail_required() {
    let mut body = valid_project_json();
    body["website_type"] = json!("    ");
    body["overview"]["description"] = json!("\n\t");

    assert_eq!(
        rejected_fields(body),
        vec!["website_type", "overview.description"]
    );
}

#[test]
fn null_is_treated_as_missing() {
    let mut body = valid_project_json();
    body["website_name"] = json!(null);

    assert_eq!(rejected_fields(body), vec!["website_name"]);
}

#[test]
fn length_bounds_are_enforced_at_every_level() {
    let mut body = valid_project_json();
    body["website_name"] = json!("n".repeat(101));
    body["overview"]["title"] = json!("t".repeat(301));
    body["overview"]["description"] = json!("d".repeat(1001));
    body["overview"]["ProjectInfos"][0]["title"] = json!("p".repeat(51));
    body["overview"]["links"][0]["linkLabel"] = json!("l".repeat(51));
    body["images_url"][1]["label"] = json!("i".repeat(301));

    assert_eq!(
        rejected_fields(body),
        vec![
            "website_name",
            "overview.title",
            "overview.description",
            "overview.ProjectInfos[0].title",
            "overview.links[0].linkLabel",
            "images_url[1].label",
        ]
    );
}

#[test]
fn values_at_the_bounds_are_accepted() {
    let mut body = valid_project_json();
    body["website_name"] = json!("n".repeat(100));
    body["overview"]["description"] = json!("d".repeat(1000));
    body["overview"]["ProjectInfos"] = project_infos_json(7);
    body["images_url"] = images_json(10);

    assert!(validate_project(draft(body)).is_ok());
}

#[test]
fn malformed_urls_are_rejected() {
    let mut body = valid_project_json();
    body["scroll_image_url"] = json!("img/1.png");
    body["overview"]["links"][0]["url"] = json!("ftp://x.com");
    body["images_url"][0]["img"] = json!("https:// spaced.png");

    let errors = validate_project(draft(body)).unwrap_err();

    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(
        fields,
        vec!["scroll_image_url", "overview.links[0].url", "images_url[0].img"]
    );
    assert_eq!(errors[0].message, "Invalid scroll image URL format");
    assert_eq!(errors[1].message, "Invalid URL format");
    assert_eq!(errors[2].message, "Invalid image URL format");
}

#[test]
fn list_entry_shapes() {
    let lists = json!([
        "Home",
        [{ "linkLabel": "Home", "url": "https://x.com" }],
        { "linkLabel": "Home", "url": "https://x.com" },
        [{ "linkLabel": "Home" }]
    ]);

    let mut body = valid_project_json();
    body["overview"]["ProjectInfos"][0]["lists"] = lists;

    assert_eq!(
        rejected_fields(body),
        vec![
            "overview.ProjectInfos[0].lists[2]",
            "overview.ProjectInfos[0].lists[3][0].url",
        ]
    );
}

#[test]
fn empty_link_group_is_accepted() {
    let mut body = valid_project_json();
    body["overview"]["ProjectInfos"][0]["lists"] = json!([[]]);

    let project = validate_project(draft(body)).unwrap();

    assert_eq!(project.overview.project_infos[0].lists, vec![ListEntry::Links(vec![])]);
}

#[test]
fn array_caps_are_checked_on_the_whole_array() {
    let mut body = valid_project_json();
    body["overview"]["ProjectInfos"][0]["lists"] = json!(["a", "b", "c", "d", "e", "f"]);
    let mut infos = body["overview"]["ProjectInfos"].as_array().unwrap().clone();
    infos.extend((0..6).map(|i| project_info_json(&format!("Extra {i}"))));
    body["overview"]["ProjectInfos"] = serde_json::Value::Array(infos);
    body["overview"]["links"] = json!([
        { "linkLabel": "a", "url": "https://a.dev" },
        { "linkLabel": "b", "url": "https://b.dev" },
        { "linkLabel": "c", "url": "https://c.dev" },
        { "linkLabel": "d", "url": "https://d.dev" }
    ]);
    body["images_url"] = images_json(11);

    let errors = validate_project(draft(body)).unwrap_err();
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();

    assert_eq!(
        fields,
        vec![
            "overview.ProjectInfos",
            "overview.ProjectInfos[0].lists",
            "overview.links",
            "images_url",
        ]
    );
    assert_eq!(errors[0].message, "ProjectInfos must not exceed 7 items");
    assert_eq!(errors[2].message, "Links must not exceed 3 items");
    assert_eq!(errors[3].message, "Images must not exceed 10 items");
}

#[test]
fn invalid_list_type_is_rejected() {
    let mut body = valid_project_json();
    body["overview"]["ProjectInfos"][1]["listType"] = json!("grid");

    assert_eq!(
        rejected_fields(body),
        vec!["overview.ProjectInfos[1].listType"]
    );
}

#[test]
fn snake_case_aliases_are_accepted_on_input() {
    let body = json!({
        "website_name": "Portfolio",
        "website_type": "SPA",
        "scroll_image_url": "https://img/1.png",
        "overview": {
            "title": "Title",
            "description": "Description",
            "project_infos": [
                { "title": "Links", "list_type": "vertical", "lists": [[{ "link_label": "Home", "url": "https://x.com" }]] }
            ],
            "links": []
        },
        "images_url": []
    });

    let project = validate_project(draft(body)).unwrap();

    assert_eq!(project.overview.project_infos.len(), 1);
}

#[test]
fn stored_document_uses_camel_case_wire_names() {
    let project = validate_project(draft(valid_project_json())).unwrap();
    let rendered = serde_json::to_value(&project.overview).unwrap();

    assert!(rendered.get("ProjectInfos").is_some());
    assert_eq!(rendered["ProjectInfos"][0]["listType"], "horizontal");
    assert_eq!(rendered["links"][0]["linkLabel"], "Live site");
}

#[test]
fn positional_arrays_never_stand_in_for_objects() {
    let mut body = valid_project_json();
    body["overview"]["ProjectInfos"][0]["lists"] = json!([[["Home", "https://x.com"]]]);
    body["overview"]["links"] = json!([["Live", "https://x.com"]]);
    body["images_url"] = json!([["https://img/1.png", "Shot"]]);

    assert_eq!(
        rejected_fields(body),
        vec![
            "overview.ProjectInfos[0].lists[0]",
            "overview.links[0]",
            "images_url[0]",
        ]
    );
}

#[test]
fn mistyped_fields_are_reported_by_path() {
    let mut body = valid_project_json();
    body["website_name"] = json!(123);
    body["overview"]["ProjectInfos"][1]["lists"] = json!("Home");
    body["overview"]["links"][0]["url"] = json!(["https://x.com"]);
    body["images_url"] = json!({ "img": "https://img/1.png", "label": "Shot" });

    let errors = validate_project(draft(body)).unwrap_err();
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();

    assert_eq!(
        fields,
        vec![
            "website_name",
            "overview.ProjectInfos[1].lists",
            "overview.links[0].url",
            "images_url",
        ]
    );
    assert_eq!(errors[0].message, "Must be a string");
    assert_eq!(errors[1].message, "Must be an array");
    assert_eq!(errors[3].message, "Must be an array");
}

#[test]
fn nul_characters_fail_validation() {
    let mut body = valid_project_json();
    body["website_type"] = json!("S\u{0}PA");
    body["overview"]["ProjectInfos"][0]["lists"] = json!(["Ru\u{0}st"]);

    assert_eq!(
        rejected_fields(body),
        vec!["website_type", "overview.ProjectInfos[0].lists[0]"]
    );
}

fn stored(value: serde_json::Value) -> Project {
    let insert = validate_project(draft(value)).unwrap();
    let now = chrono::Utc::now();

    Project {
        id: uuid::Uuid::new_v4(),
        website_name: insert.website_name,
        website_type: insert.website_type,
        scroll_image_url: insert.scroll_image_url,
        overview: insert.overview,
        images_url: insert.images_url,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn patch_merge_keeps_absent_fields_and_clears_nulls() {
    let current = stored(valid_project_json());

    let merged = patch(json!({ "website_type": "MPA", "images_url": [] }))
        .merge_into(current.clone());
    let project = validate_project(merged).unwrap();

    assert_eq!(project.website_name, current.website_name);
    assert_eq!(project.website_type, "MPA");
    assert_eq!(project.overview, current.overview);
    assert!(project.images_url.is_empty());

    let merged = patch(json!({ "overview": null })).merge_into(current);
    assert_eq!(
        validate_project(merged).unwrap_err()[0].message,
        "Project overview is required"
    );
}
