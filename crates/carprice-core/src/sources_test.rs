use super::*;

const SHIPPED: &str = include_str!("../../../config/sources.yaml");

fn minimal_yaml(name: &str, page_url: &str, per_page: u32) -> String {
    format!(
        r#"
sources:
  - name: "{name}"
    base_url: "https://example.test/"
    pagination:
      page_url: "{page_url}"
      offers_per_page: {per_page}
      offer_count:
        fixed: 30
    taxonomy:
      url: "https://example.test/search"
      make_options: "select#make option"
      strategy: static_table
    listings:
      selector: "a.offer"
      extract:
        attribute: href
    detail:
      title: [{{ select: {{ css: "h1" }} }}]
      price: [{{ select: {{ css: "li strong", nth: 0 }} }}]
      year: [{{ select: {{ css: "li strong", nth: 1 }} }}]
      fuel_type: [{{ select: {{ css: "li strong", nth: 2 }} }}]
      horse_power: [{{ select: {{ css: "li strong", nth: 3 }} }}]
      gear_type: [{{ select: {{ css: "li strong", nth: 4 }} }}]
      range: [{{ select: {{ css: "li strong", nth: 5 }} }}]
    separators:
      price: " "
      range: " "
"#
    )
}

#[test]
fn shipped_sources_parse_and_validate() {
    let file = parse_sources(SHIPPED).expect("shipped sources.yaml must be valid");
    let names: Vec<&str> = file.sources.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["cars.bg", "carmarket.bg"]);
    assert_eq!(file.enabled().count(), 2);
}

#[test]
fn shipped_cars_bg_uses_per_make_requests_and_fixed_count() {
    let file = parse_sources(SHIPPED).unwrap();
    let cars = &file.sources[0];
    assert_eq!(cars.pagination.order, PageOrder::Descending);
    assert_eq!(cars.pagination.first_page, 1);
    assert_eq!(cars.pagination.offer_count, OfferCount::Fixed(86_553));
    assert!(matches!(
        cars.taxonomy.strategy,
        TaxonomyStrategy::PerMakeRequest {
            label: LabelSource::NextSibling,
            ..
        }
    ));
    assert_eq!(
        cars.listings.extract,
        LinkExtraction::Pattern("offer/c[0-9]+".to_string())
    );
    assert_eq!(cars.detail.year.len(), 12);
    assert_eq!(cars.detail.year[1], PathStep::Child(0));
}

#[test]
fn shipped_carmarket_discovers_count_and_uses_static_table() {
    let file = parse_sources(SHIPPED).unwrap();
    let carmarket = &file.sources[1];
    assert_eq!(carmarket.pagination.order, PageOrder::Ascending);
    assert!(matches!(
        carmarket.pagination.offer_count,
        OfferCount::Discover { ref separator, .. } if separator == " "
    ));
    assert_eq!(carmarket.taxonomy.strategy, TaxonomyStrategy::StaticTable);
    assert_eq!(
        carmarket.detail.range,
        vec![PathStep::Select {
            css: "div.cmOfferMoreInfoRow strong".to_string(),
            nth: 6
        }]
    );
    assert!(!carmarket.allow_ungrouped_numbers);
}

#[test]
fn minimal_profile_applies_defaults() {
    let yaml = minimal_yaml("example", "https://example.test/p/{page}", 10);
    let file = parse_sources(&yaml).unwrap();
    let source = &file.sources[0];
    assert!(source.enabled);
    assert_eq!(source.pagination.first_page, 0);
    assert_eq!(source.pagination.order, PageOrder::Ascending);
}

#[test]
fn validate_rejects_zero_offers_per_page() {
    let yaml = minimal_yaml("example", "https://example.test/p/{page}", 0);
    let err = parse_sources(&yaml).unwrap_err();
    assert!(err.to_string().contains("offers_per_page 0"), "got: {err}");
}

#[test]
fn validate_rejects_page_url_without_placeholder() {
    let yaml = minimal_yaml("example", "https://example.test/p/1", 10);
    let err = parse_sources(&yaml).unwrap_err();
    assert!(err.to_string().contains("{page}"), "got: {err}");
}

#[test]
fn validate_rejects_empty_name() {
    let yaml = minimal_yaml("  ", "https://example.test/p/{page}", 10);
    let err = parse_sources(&yaml).unwrap_err();
    assert!(err.to_string().contains("non-empty"), "got: {err}");
}

#[test]
fn validate_rejects_duplicate_names_case_insensitively() {
    let mut file = parse_sources(&minimal_yaml("Example", "https://example.test/{page}", 10))
        .unwrap();
    let mut twin = file.sources[0].clone();
    twin.name = "EXAMPLE".to_string();
    file.sources.push(twin);
    let err = validate_sources(&file).unwrap_err();
    assert!(err.to_string().contains("duplicate source name"), "got: {err}");
}

#[test]
fn validate_rejects_per_make_url_without_placeholder() {
    let mut file =
        parse_sources(&minimal_yaml("example", "https://example.test/{page}", 10)).unwrap();
    file.sources[0].taxonomy.strategy = TaxonomyStrategy::PerMakeRequest {
        url: "https://example.test/models".to_string(),
        model_selector: ".model".to_string(),
        label: LabelSource::SelfText,
    };
    let err = validate_sources(&file).unwrap_err();
    assert!(err.to_string().contains("{make_id}"), "got: {err}");
}

#[test]
fn validate_rejects_empty_detail_path() {
    let mut file =
        parse_sources(&minimal_yaml("example", "https://example.test/{page}", 10)).unwrap();
    file.sources[0].detail.gear_type.clear();
    let err = validate_sources(&file).unwrap_err();
    assert!(err.to_string().contains("gear_type"), "got: {err}");
}

#[test]
fn load_sources_reports_missing_file() {
    let err = load_sources(Path::new("/nonexistent/sources.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::SourcesFileIo { .. }));
}
