//! Schema rules for project documents.
//!
//! Each embedded entity has its own `validate_*` entry point so it can be
//! checked in isolation; they compose bottom-up
//! (`Link` → `ProjectInfo` → `Overview` → `Project`). Every rule is
//! evaluated and all failures are reported together, keyed by the wire
//! path of the offending field (e.g. `overview.ProjectInfos[1].lists[0][2].url`).
//! A candidate with any failure is rejected in full.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::{ValidateLength, ValidationError};

use crate::{
    entities::project::{
        Image, ImageDraft, Link, LinkDraft, ListEntry, ListEntryDraft, ListType, Overview,
        OverviewDraft, ProjectDraft, ProjectInfo, ProjectInfoDraft, ProjectInsert, Received,
        MAX_IMAGES, MAX_IMAGE_LABEL_LENGTH, MAX_LINK_LABEL_LENGTH, MAX_LISTS,
        MAX_OVERVIEW_DESCRIPTION_LENGTH, MAX_OVERVIEW_LINKS, MAX_OVERVIEW_TITLE_LENGTH,
        MAX_PROJECT_INFOS, MAX_PROJECT_INFO_TITLE_LENGTH, MAX_WEBSITE_NAME_LENGTH,
        MAX_WEBSITE_TYPE_LENGTH,
    },
    errors::FieldError,
};

/// `http(s)://` followed by a non-whitespace host and an optional rest.
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[^\s$.?#].[^\s]*$").expect("URL pattern must compile")
});

// ───── Rule Tables ──────────────────────────────────────────────────

struct TextRule {
    required: &'static str,
    trim: bool,
    max_length: Option<(u64, &'static str)>,
    url_format: Option<&'static str>,
}

struct SeqRule {
    required: &'static str,
    max_items: u64,
    too_many: &'static str,
}

const WEBSITE_NAME: TextRule = TextRule {
    required: "Website name is required",
    trim: true,
    max_length: Some((MAX_WEBSITE_NAME_LENGTH, "Website name must not exceed 100 characters")),
    url_format: None,
};

const WEBSITE_TYPE: TextRule = TextRule {
    required: "Website type is required",
    trim: true,
    max_length: Some((MAX_WEBSITE_TYPE_LENGTH, "Website type must not exceed 100 characters")),
    url_format: None,
};

const SCROLL_IMAGE_URL: TextRule = TextRule {
    required: "Scroll image URL is required",
    trim: false,
    max_length: None,
    url_format: Some("Invalid scroll image URL format"),
};

const OVERVIEW_TITLE: TextRule = TextRule {
    required: "Project overview title is required",
    trim: true,
    max_length: Some((
        MAX_OVERVIEW_TITLE_LENGTH,
        "Project overview title must not exceed 300 characters",
    )),
    url_format: None,
};

const OVERVIEW_DESCRIPTION: TextRule = TextRule {
    required: "Project overview description is required",
    trim: true,
    max_length: Some((
        MAX_OVERVIEW_DESCRIPTION_LENGTH,
        "Description must not exceed 1000 characters",
    )),
    url_format: None,
};

const PROJECT_INFO_TITLE: TextRule = TextRule {
    required: "Project title is required",
    trim: true,
    max_length: Some((MAX_PROJECT_INFO_TITLE_LENGTH, "Title must not exceed 50 characters")),
    url_format: None,
};

const LINK_LABEL: TextRule = TextRule {
    required: "Link label is required",
    trim: true,
    max_length: Some((MAX_LINK_LABEL_LENGTH, "Link label must not exceed 50 characters")),
    url_format: None,
};

const LINK_URL: TextRule = TextRule {
    required: "URL is required",
    trim: true,
    max_length: None,
    url_format: Some("Invalid URL format"),
};

const IMAGE_IMG: TextRule = TextRule {
    required: "Image URL is required",
    trim: false,
    max_length: None,
    url_format: Some("Invalid image URL format"),
};

const IMAGE_LABEL: TextRule = TextRule {
    required: "Image label is required",
    trim: true,
    max_length: Some((MAX_IMAGE_LABEL_LENGTH, "Image label must not exceed 300 characters")),
    url_format: None,
};

const LISTS: SeqRule = SeqRule {
    required: "At least one link is required",
    max_items: MAX_LISTS,
    too_many: "Links must not exceed 5 items",
};

const PROJECT_INFOS: SeqRule = SeqRule {
    required: "Project information is required",
    max_items: MAX_PROJECT_INFOS,
    too_many: "ProjectInfos must not exceed 7 items",
};

const OVERVIEW_LINKS: SeqRule = SeqRule {
    required: "Links are required",
    max_items: MAX_OVERVIEW_LINKS,
    too_many: "Links must not exceed 3 items",
};

const IMAGES: SeqRule = SeqRule {
    required: "Images are required",
    max_items: MAX_IMAGES,
    too_many: "Images must not exceed 10 items",
};

const LIST_TYPE_MESSAGE: &str = "listType must be either 'horizontal' or 'vertical'";
const LIST_ENTRY_MESSAGE: &str = "Lists must contain either strings or an array of link objects";
const OVERVIEW_REQUIRED_MESSAGE: &str = "Project overview is required";
const NUL_MESSAGE: &str = "Must not contain NUL characters";
const STRING_TYPE_MESSAGE: &str = "Must be a string";
const ARRAY_TYPE_MESSAGE: &str = "Must be an array";
const OBJECT_TYPE_MESSAGE: &str = "Must be an object";

// ───── Public Entry Points ──────────────────────────────────────────

pub fn validate_link(candidate: LinkDraft) -> Result<Link, Vec<FieldError>> {
    let mut violations = Violations::default();
    let link = check_link(candidate, "", &mut violations);
    violations.finish(link)
}

pub fn validate_project_info(candidate: ProjectInfoDraft) -> Result<ProjectInfo, Vec<FieldError>> {
    let mut violations = Violations::default();
    let info = check_project_info(candidate, "", &mut violations);
    violations.finish(info)
}

pub fn validate_overview(candidate: OverviewDraft) -> Result<Overview, Vec<FieldError>> {
    let mut violations = Violations::default();
    let overview = check_overview(candidate, "", &mut violations);
    violations.finish(overview)
}

pub fn validate_image(candidate: ImageDraft) -> Result<Image, Vec<FieldError>> {
    let mut violations = Violations::default();
    let image = check_image(candidate, "", &mut violations);
    violations.finish(image)
}

/// Validates and normalizes a complete project candidate.
pub fn validate_project(candidate: ProjectDraft) -> Result<ProjectInsert, Vec<FieldError>> {
    let mut violations = Violations::default();
    let v = &mut violations;

    let website_name = check_text(candidate.website_name, "website_name", &WEBSITE_NAME, v);
    let website_type = check_text(candidate.website_type, "website_type", &WEBSITE_TYPE, v);
    let scroll_image_url =
        check_text(candidate.scroll_image_url, "scroll_image_url", &SCROLL_IMAGE_URL, v);

    let overview = match candidate.overview {
        Some(overview) => check_object(overview, "overview", v)
            .map(|overview| check_overview(overview, "overview", v))
            .unwrap_or_else(Overview::empty),
        None => {
            v.add("overview", new_validation_error("required", OVERVIEW_REQUIRED_MESSAGE));
            Overview::empty()
        }
    };

    let images = check_items(candidate.images_url, "images_url", &IMAGES, v);
    let images_url = check_each(images, "images_url", v, check_image);

    violations.finish(ProjectInsert {
        website_name,
        website_type,
        scroll_image_url,
        overview,
        images_url,
    })
}

/// True when `value` is an absolute `http`/`https` URL with a host.
pub fn is_valid_url(value: &str) -> bool {
    URL_PATTERN.is_match(value)
}

// ───── Entity Checks ────────────────────────────────────────────────

fn check_link(candidate: LinkDraft, path: &str, v: &mut Violations) -> Link {
    Link {
        link_label: check_text(candidate.link_label, &field(path, "linkLabel"), &LINK_LABEL, v),
        url: check_text(candidate.url, &field(path, "url"), &LINK_URL, v),
    }
}

fn check_list_entry(candidate: ListEntryDraft, path: &str, v: &mut Violations) -> ListEntry {
    match candidate {
        ListEntryDraft::Label(label) => {
            if label.contains('\0') {
                v.add(path, new_validation_error("nul", NUL_MESSAGE));
            }
            ListEntry::Label(label)
        }
        ListEntryDraft::Links(links) => ListEntry::Links(
            links
                .into_iter()
                .enumerate()
                .map(|(i, link)| check_link(link, &format!("{path}[{i}]"), v))
                .collect(),
        ),
        ListEntryDraft::Malformed(_) => {
            v.add(path, new_validation_error("list_entry", LIST_ENTRY_MESSAGE));
            ListEntry::Links(Vec::new())
        }
    }
}

fn check_project_info(candidate: ProjectInfoDraft, path: &str, v: &mut Violations) -> ProjectInfo {
    let title = check_text(candidate.title, &field(path, "title"), &PROJECT_INFO_TITLE, v);

    let list_type = match candidate.list_type {
        None => ListType::default(),
        Some(raw) => parse_list_type(raw).unwrap_or_else(|| {
            v.add(&field(path, "listType"), new_validation_error("enum", LIST_TYPE_MESSAGE));
            ListType::default()
        }),
    };

    let lists_path = field(path, "lists");
    let lists = check_items(candidate.lists, &lists_path, &LISTS, v)
        .into_iter()
        .enumerate()
        .map(|(i, entry)| check_list_entry(entry, &format!("{lists_path}[{i}]"), v))
        .collect();

    ProjectInfo {
        title,
        list_type,
        lists,
    }
}

fn check_overview(candidate: OverviewDraft, path: &str, v: &mut Violations) -> Overview {
    let title = check_text(candidate.title, &field(path, "title"), &OVERVIEW_TITLE, v);
    let description = check_text(
        candidate.description,
        &field(path, "description"),
        &OVERVIEW_DESCRIPTION,
        v,
    );

    let infos_path = field(path, "ProjectInfos");
    let infos = check_items(candidate.project_infos, &infos_path, &PROJECT_INFOS, v);
    let project_infos = check_each(infos, &infos_path, v, check_project_info);

    let links_path = field(path, "links");
    let links = check_items(candidate.links, &links_path, &OVERVIEW_LINKS, v);
    let links = check_each(links, &links_path, v, check_link);

    Overview {
        title,
        description,
        project_infos,
        links,
    }
}

fn check_image(candidate: ImageDraft, path: &str, v: &mut Violations) -> Image {
    Image {
        img: check_text(candidate.img, &field(path, "img"), &IMAGE_IMG, v),
        label: check_text(candidate.label, &field(path, "label"), &IMAGE_LABEL, v),
    }
}

// ───── Field Checks ─────────────────────────────────────────────────

fn check_text(
    value: Option<Received<String>>,
    path: &str,
    rule: &TextRule,
    v: &mut Violations,
) -> String {
    let raw = match value {
        None => {
            v.add(path, new_validation_error("required", rule.required));
            return String::new();
        }
        Some(Received::Mistyped(_)) => {
            v.add(path, new_validation_error("type", STRING_TYPE_MESSAGE));
            return String::new();
        }
        Some(Received::Expected(raw)) => raw,
    };

    let value = if rule.trim { raw.trim().to_string() } else { raw };

    if !value.validate_length(Some(1), None, None) {
        v.add(path, new_validation_error("required", rule.required));
        return value;
    }

    if value.contains('\0') {
        v.add(path, new_validation_error("nul", NUL_MESSAGE));
    }

    if let Some((max, message)) = rule.max_length {
        if !value.validate_length(None, Some(max), None) {
            v.add(path, new_validation_error("length", message));
        }
    }

    if let Some(message) = rule.url_format {
        if !is_valid_url(&value) {
            v.add(path, new_validation_error("url", message));
        }
    }

    value
}

/// Checks presence and the item cap of a whole sequence; elements are
/// validated separately by the caller.
fn check_items<T>(
    value: Option<Received<Vec<T>>>,
    path: &str,
    rule: &SeqRule,
    v: &mut Violations,
) -> Vec<T> {
    let items = match value {
        None => {
            v.add(path, new_validation_error("required", rule.required));
            return Vec::new();
        }
        Some(Received::Mistyped(_)) => {
            v.add(path, new_validation_error("type", ARRAY_TYPE_MESSAGE));
            return Vec::new();
        }
        Some(Received::Expected(items)) => items,
    };

    if !items.validate_length(None, Some(rule.max_items), None) {
        v.add(path, new_validation_error("length", rule.too_many));
    }

    items
}

fn check_each<D, T>(
    items: Vec<Received<D>>,
    path: &str,
    v: &mut Violations,
    check: fn(D, &str, &mut Violations) -> T,
) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let item_path = format!("{path}[{i}]");
            check_object(item, &item_path, v).map(|item| check(item, &item_path, v))
        })
        .collect()
}

fn check_object<T>(value: Received<T>, path: &str, v: &mut Violations) -> Option<T> {
    match value {
        Received::Expected(object) => Some(object),
        Received::Mistyped(_) => {
            v.add(path, new_validation_error("type", OBJECT_TYPE_MESSAGE));
            None
        }
    }
}

fn parse_list_type(raw: Received<String>) -> Option<ListType> {
    match raw {
        Received::Expected(raw) => raw.parse().ok(),
        Received::Mistyped(_) => None,
    }
}

fn field(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

#[derive(Debug, Default)]
struct Violations(Vec<FieldError>);

impl Violations {
    fn add(&mut self, path: &str, error: ValidationError) {
        let message = error
            .message
            .map(|m| m.to_string())
            .unwrap_or_else(|| "Invalid value".to_string());

        self.0.push(FieldError {
            field: path.to_string(),
            message,
        });
    }

    fn finish<T>(self, value: T) -> Result<T, Vec<FieldError>> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(self.0)
        }
    }
}

impl Overview {
    fn empty() -> Self {
        Overview {
            title: String::new(),
            description: String::new(),
            project_infos: Vec::new(),
            links: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::DeserializeOwned;
    use serde_json::{json, Value};

    fn from_json<T: DeserializeOwned>(value: Value) -> T {
        serde_json::from_value(value).unwrap()
    }

    fn link(label: &str, url: &str) -> LinkDraft {
        from_json(json!({ "linkLabel": label, "url": url }))
    }

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn url_pattern_accepts_http_and_https_only() {
        assert!(is_valid_url("https://x.com"));
        assert!(is_valid_url("http://localhost:5173/path?q=1"));
        assert!(is_valid_url("https://img/1.png"));

        assert!(!is_valid_url("ftp://x.com"));
        assert!(!is_valid_url("x.com"));
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url("https://.x.com"));
        assert!(!is_valid_url("https://x.com/a b"));
        assert!(!is_valid_url(" https://x.com"));
    }

    #[test]
    fn link_is_trimmed_before_checks() {
        let link = validate_link(link("  Home  ", "  https://x.com ")).unwrap();

        assert_eq!(link.link_label, "Home");
        assert_eq!(link.url, "https://x.com");
    }

    #[test]
    fn whitespace_only_label_fails_required() {
        let errors = validate_link(link("   ", "https://x.com")).unwrap_err();

        assert_eq!(fields(&errors), vec!["linkLabel"]);
        assert_eq!(errors[0].message, "Link label is required");
    }

    #[test]
    fn link_label_length_counts_characters() {
        assert!(validate_link(link(&"é".repeat(50), "https://x.com")).is_ok());

        let errors = validate_link(link(&"a".repeat(51), "https://x.com")).unwrap_err();
        assert_eq!(errors[0].message, "Link label must not exceed 50 characters");
    }

    #[test]
    fn nul_characters_are_rejected() {
        let errors = validate_link(link("Ho\u{0}me", "https://x.com")).unwrap_err();
        assert_eq!(fields(&errors), vec!["linkLabel"]);
        assert_eq!(errors[0].message, NUL_MESSAGE);

        let errors = validate_project_info(from_json(json!({
            "title": "Pages",
            "lists": ["Home", "Ab\u{0}out"]
        })))
        .unwrap_err();
        assert_eq!(fields(&errors), vec!["lists[1]"]);
        assert_eq!(errors[0].message, NUL_MESSAGE);
    }

    #[test]
    fn mistyped_values_are_field_errors() {
        let errors = validate_project_info(from_json(json!({
            "title": 42,
            "listType": true,
            "lists": "Home"
        })))
        .unwrap_err();

        assert_eq!(fields(&errors), vec!["title", "listType", "lists"]);
        assert_eq!(errors[0].message, STRING_TYPE_MESSAGE);
        assert_eq!(errors[1].message, LIST_TYPE_MESSAGE);
        assert_eq!(errors[2].message, ARRAY_TYPE_MESSAGE);
    }

    #[test]
    fn project_info_defaults_to_vertical() {
        let info = validate_project_info(from_json(json!({
            "title": "Stack",
            "lists": ["Rust"]
        })))
        .unwrap();

        assert_eq!(info.list_type, ListType::Vertical);
    }

    #[test]
    fn project_info_rejects_unknown_list_type() {
        let errors = validate_project_info(from_json(json!({
            "title": "Stack",
            "listType": "diagonal",
            "lists": []
        })))
        .unwrap_err();

        assert_eq!(fields(&errors), vec!["listType"]);
        assert_eq!(errors[0].message, LIST_TYPE_MESSAGE);
    }

    #[test]
    fn missing_lists_use_the_link_wording() {
        let errors = validate_project_info(from_json(json!({ "title": "Stack" }))).unwrap_err();

        assert_eq!(fields(&errors), vec!["lists"]);
        assert_eq!(errors[0].message, "At least one link is required");
    }

    #[test]
    fn list_entries_accept_labels_and_link_groups() {
        let info = validate_project_info(from_json(json!({
            "title": "Pages",
            "listType": "horizontal",
            "lists": [
                "Home",
                [{ "linkLabel": "Home", "url": "https://x.com" }],
                []
            ]
        })))
        .unwrap();

        assert_eq!(info.lists[0], ListEntry::Label("Home".into()));
        assert_eq!(
            info.lists[1],
            ListEntry::Links(vec![Link {
                link_label: "Home".into(),
                url: "https://x.com".into(),
            }])
        );
        assert_eq!(info.lists[2], ListEntry::Links(Vec::new()));
    }

    #[test]
    fn list_entries_reject_bare_objects_and_incomplete_links() {
        let errors = validate_project_info(from_json(json!({
            "title": "Pages",
            "lists": [
                { "linkLabel": "Home", "url": "https://x.com" },
                [{ "linkLabel": "Home" }],
                42
            ]
        })))
        .unwrap_err();

        assert_eq!(fields(&errors), vec!["lists[0]", "lists[1][0].url", "lists[2]"]);
        assert_eq!(errors[0].message, LIST_ENTRY_MESSAGE);
    }

    #[test]
    fn link_groups_with_positional_members_are_malformed() {
        let errors = validate_project_info(from_json(json!({
            "title": "Pages",
            "lists": [[["Home", "https://x.com"]], ["Home"]]
        })))
        .unwrap_err();

        assert_eq!(fields(&errors), vec!["lists[0]", "lists[1]"]);
        assert!(errors.iter().all(|e| e.message == LIST_ENTRY_MESSAGE));
    }

    #[test]
    fn sequence_caps_apply_to_the_whole_array() {
        let errors = validate_project_info(from_json(json!({
            "title": "Too many",
            "lists": ["a", "b", "c", "d", "e", "f"]
        })))
        .unwrap_err();

        assert_eq!(fields(&errors), vec!["lists"]);
        assert_eq!(errors[0].message, "Links must not exceed 5 items");
    }

    #[test]
    fn missing_overview_is_reported_once() {
        let errors = validate_project(from_json(json!({
            "website_name": "Portfolio",
            "website_type": "SPA",
            "scroll_image_url": "https://img/1.png",
            "images_url": []
        })))
        .unwrap_err();

        assert_eq!(fields(&errors), vec!["overview"]);
    }

    #[test]
    fn embedded_entities_must_be_objects() {
        let errors = validate_project(from_json(json!({
            "website_name": "Portfolio",
            "website_type": "SPA",
            "scroll_image_url": "https://img/1.png",
            "overview": {
                "title": "Title",
                "description": "Description",
                "ProjectInfos": [["Stack", "vertical", ["Rust"]]],
                "links": [["Live", "https://x.com"]]
            },
            "images_url": [["https://img/1.png", "Shot"], "https://img/2.png"]
        })))
        .unwrap_err();

        assert_eq!(
            fields(&errors),
            vec![
                "overview.ProjectInfos[0]",
                "overview.links[0]",
                "images_url[0]",
                "images_url[1]",
            ]
        );
        assert!(errors.iter().all(|e| e.message == OBJECT_TYPE_MESSAGE));
    }

    #[test]
    fn nested_failures_carry_full_paths() {
        let errors = validate_project(from_json(json!({
            "website_type": "SPA",
            "scroll_image_url": "not a url",
            "overview": {
                "title": "Title",
                "description": "Description",
                "ProjectInfos": [{
                    "title": "Pages",
                    "lists": [[{ "linkLabel": "Home", "url": "mailto:x" }]]
                }],
                "links": [{ "linkLabel": "Live", "url": "https://x.com" }]
            },
            "images_url": [{ "img": "https://img/1.png" }]
        })))
        .unwrap_err();

        assert_eq!(
            fields(&errors),
            vec![
                "website_name",
                "scroll_image_url",
                "overview.ProjectInfos[0].lists[0][0].url",
                "images_url[0].label",
            ]
        );
    }
}
