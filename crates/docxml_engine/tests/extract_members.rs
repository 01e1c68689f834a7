mod common;

use common::{description_block, member_section, parameters_block, reference_page, url};
use docxml_core::{DocRecord, MemberKind, ParamEntry};
use docxml_engine::{ConstructorExtractor, FetchedPage, FunctionExtractor, MemberExtractor};
use pretty_assertions::assert_eq;

fn constructors(html: String) -> Vec<DocRecord> {
    ConstructorExtractor::new("UnityEngine.").extract(&FetchedPage::new(url("Ctor.html"), html))
}

fn functions(html: String) -> Vec<DocRecord> {
    FunctionExtractor::new("UnityEngine.").extract(&FetchedPage::new(url("Func.html"), html))
}

const RIGIDBODY_HEADING: &str = r#"<a href="Rigidbody.html">Rigidbody</a>.AddForce"#;

#[test]
fn constructor_overloads_each_become_a_record() {
    let body = [
        member_section(
            "public Vector3(float x, float y, float z);",
            &description_block("Creates a new vector with given x, y, z components."),
        ),
        member_section("public Vector3(float x, float y);", ""),
    ]
    .concat();
    let records = constructors(reference_page("Vector3 Constructor", &body));

    assert_eq!(
        records,
        vec![
            DocRecord::new("C:UnityEngine.public Vector3(float x, float y, float z)")
                .with_summary("Creates a new vector with given x, y, z components.")
                .with_params(vec![
                    ParamEntry::named("x"),
                    ParamEntry::named("y"),
                    ParamEntry::named("z"),
                ]),
            DocRecord::new("C:UnityEngine.public Vector3(float x, float y)")
                .with_params(vec![ParamEntry::named("x"), ParamEntry::named("y")]),
        ]
    );
}

#[test]
fn constructor_section_without_signature_is_skipped() {
    let body = [
        r#"<div class="section"><div class="mb20"><p>broken</p></div></div>"#.to_string(),
        member_section("Foo(int x, string y);", ""),
    ]
    .concat();
    let records = constructors(reference_page("Foo Constructor", &body));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "C:UnityEngine.Foo(int x, string y)");
    assert_eq!(
        records[0].params,
        vec![ParamEntry::named("x"), ParamEntry::named("y")]
    );
}

#[test]
fn function_record_carries_description_and_params() {
    let extra = [
        description_block("Adds a force to the Rigidbody."),
        parameters_block(&[("force", " Force vector in world coordinates. "), ("mode", "")]),
    ]
    .concat();
    let body = member_section(
        "public void AddForce(Vector3 force,\n    ForceMode mode = ForceMode.Force);",
        &extra,
    );
    let records = functions(reference_page(RIGIDBODY_HEADING, &body));

    assert_eq!(
        records,
        vec![DocRecord::new(
            "M:UnityEngine.Rigidbody.AddForce(Vector3 force,    ForceMode mode = ForceMode.Force)"
        )
        .with_summary("Adds a force to the Rigidbody.")
        .with_params(vec![
            ParamEntry::described("force", "Force vector in world coordinates."),
            ParamEntry::described("mode", ""),
        ])]
    );
}

#[test]
fn function_params_keep_row_count_and_order() {
    let params = [("a", "first"), ("b", "second"), ("c", "third"), ("d", "")];
    let body = member_section(
        "public static float Max(float a, float b, float c, float d);",
        &parameters_block(&params),
    );
    let records = functions(reference_page(r#"<a href="Mathf.html">Mathf</a>.Max"#, &body));

    assert_eq!(records.len(), 1);
    let names: Vec<_> = records[0].params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c", "d"]);
    assert_eq!(records[0].params.len(), params.len());
}

#[test]
fn missing_description_and_params_degrade_to_empty() {
    let body = member_section("public void Sleep();", "");
    let records = functions(reference_page(r#"<a href="Rigidbody.html">Rigidbody</a>.Sleep"#, &body));
    assert_eq!(records, vec![DocRecord::new("M:UnityEngine.Rigidbody.Sleep()")]);
}

#[test]
fn unmatched_signature_yields_no_records() {
    let body = member_section("public float mass;", &description_block("Not a call."));
    let records = functions(reference_page(RIGIDBODY_HEADING, &body));
    assert!(records.is_empty());
}

#[test]
fn unmatched_signature_keeps_earlier_sections() {
    let body = [
        member_section("public void AddForce(Vector3 force);", ""),
        member_section("garbled", ""),
        member_section("public void AddForce(float x, float y, float z);", ""),
    ]
    .concat();
    let records = functions(reference_page(RIGIDBODY_HEADING, &body));
    let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["M:UnityEngine.Rigidbody.AddForce(Vector3 force)"]);
}

#[test]
fn function_page_without_heading_link_yields_nothing() {
    let body = member_section("public void AddForce(Vector3 force);", "");
    assert!(functions(reference_page("Rigidbody.AddForce", &body)).is_empty());
}

#[test]
fn every_member_record_has_a_known_prefix() {
    let ctor = constructors(reference_page(
        "Foo Constructor",
        &member_section("Foo();", ""),
    ));
    let func = functions(reference_page(
        RIGIDBODY_HEADING,
        &member_section("public void AddForce(Vector3 force);", ""),
    ));
    assert_eq!(ctor[0].kind(), Some(MemberKind::Constructor));
    assert!(ctor[0].params.is_empty());
    assert_eq!(func[0].kind(), Some(MemberKind::Method));
    for record in ctor.iter().chain(&func) {
        let prefix = &record.name[..2];
        assert!(["T:", "M:", "C:", "P:"].contains(&prefix), "{}", record.name);
    }
}

#[test]
fn extractors_report_the_kind_they_emit() {
    let extractors: [&dyn MemberExtractor; 2] = [
        &ConstructorExtractor::new("UnityEngine."),
        &FunctionExtractor::new("UnityEngine."),
    ];
    let kinds: Vec<_> = extractors.iter().map(|e| e.kind()).collect();
    assert_eq!(kinds, vec![MemberKind::Constructor, MemberKind::Method]);
}
