//! DC output of whole documents

mod fixtures;

use fixtures::{count, film, FILM_JSON, MINIMAL_JSON};
use pretty_assertions::assert_eq;
use serde_json::json;
use zdf2dc::{Converter, DcRecordList, RecordDefaults, Variant};

#[test]
fn test_minimal_document() {
    let converter = Converter::new().with_reformat(true);
    let xml = converter.convert_str(MINIMAL_JSON, Variant::Dc).unwrap();

    let expected = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<record xmlns="http://www.openarchives.org/OAI/2.0/" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <dc:identifier type="providerId">oid1616747773566</dc:identifier>
  <dc:title xml:lang="deu">Beispiel</dc:title>
  <dc:description type="object" xml:lang="deu">FSK ab 0 freigegeben</dc:description>
  <dc:format>video/vnd.ddbkultur.zdf</dc:format>
  <dc:language>Deutsch</dc:language>
  <dc:rights type="binary">https://www.deutsche-digitale-bibliothek.de/content/lizenzen/rv-fz</dc:rights>
</record>"#;
    assert_eq!(xml, expected);
}

#[test]
fn test_minimal_document_without_reformat() {
    let xml = Converter::new().convert_str(MINIMAL_JSON, Variant::Dc).unwrap();

    assert_eq!(count(&xml, "<dc:title "), 1);
    assert!(xml.contains(r#"<dc:identifier type="providerId">oid1616747773566</dc:identifier>"#));
    assert!(!xml.contains("<dc:subject"));
    assert!(!xml.contains("<dc:type"));
    // The four fixed record declarations are always written
    for prefix in ["dc", "dcterms", "doc", "europeana"] {
        assert_eq!(count(&xml, &format!("xmlns:{}=", prefix)), 1, "{}", prefix);
    }
}

#[test]
fn test_full_document() {
    let converter = Converter::new().with_reformat(true);
    let xml = converter.convert_str(FILM_JSON, Variant::Dc).unwrap();

    let expected = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<record xmlns="http://www.openarchives.org/OAI/2.0/" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/">
  <dc:identifier type="providerId">oid1616747773566</dc:identifier>
  <dc:identifier type="providerItemId">SCMS_5f1b2c3d-4e5f-6789-abcd-ef0123456789</dc:identifier>
  <dc:identifier type="uri">https://www.zdf.de/dokumentation/terra-x/die-geschichte-des-waldes-100.html</dc:identifier>
  <dc:identifier type="url">https://www.zdf.de/dokumentation/terra-x/die-geschichte-des-waldes-100.html</dc:identifier>
  <dc:identifier type="id">terra-x-die-geschichte-des-waldes-100</dc:identifier>
  <dc:identifier type="binary">https://www.zdf.de/assets/waldlichtung-100~original</dc:identifier>
  <dc:title xml:lang="deu">Die Geschichte des Waldes</dc:title>
  <dc:title xml:lang="deu">Vom Urwald zum Forst</dc:title>
  <dc:description type="object" xml:lang="deu">Der Wald prägt seit Jahrtausenden das Leben der Menschen in Mitteleuropa.</dc:description>
  <dc:description type="object" xml:lang="deu">FSK ab 0 freigegeben</dc:description>
  <dc:description type="object" xml:lang="deu">Seitenverhältnis 16:9</dc:description>
  <dc:subject xml:lang="deu">Terra X</dc:subject>
  <dc:type type="object" xml:lang="deu">Dokumentation</dc:type>
  <dcterms:alternative xml:lang="deu">Waldlichtung</dcterms:alternative>
  <dcterms:alternative xml:lang="deu">ZDF/Gruber Films</dcterms:alternative>
  <dcterms:alternative xml:lang="deu">Ein Mischwald im Frühling</dcterms:alternative>
  <dcterms:extent>44:12</dcterms:extent>
  <dcterms:created>1. März 2021</dcterms:created>
  <dc:format>video/vnd.ddbkultur.zdf</dc:format>
  <dc:language>Deutsch</dc:language>
  <dc:rights type="binary">https://www.deutsche-digitale-bibliothek.de/content/lizenzen/rv-fz</dc:rights>
</record>"#;
    assert_eq!(xml, expected);
}

#[test]
fn test_provider_id_stays_first() {
    // Elements are equal only if value, type and language all match
    let doc = json!({"externalId": "oid1616747773566", "id": "x"});
    let record = Converter::new().dc_record(&doc).record;
    let ids: Vec<(Option<&str>, &str)> = record
        .identifier
        .iter()
        .map(|e| (e.element_type(), e.value()))
        .collect();
    assert_eq!(
        ids,
        vec![
            (Some("providerId"), "oid1616747773566"),
            (Some("providerItemId"), "oid1616747773566"),
            (Some("id"), "x"),
        ]
    );
}

#[test]
fn test_zero_duration_reads_as_absent() {
    // Known edge case: a genuine zero-length video cannot be told apart
    // from a missing duration
    let doc = json!({"mainVideoContent": {"http://zdf.de/rels/target": {"duration": 0}}});
    let xml = Converter::new().to_dc_xml(&doc).unwrap();
    assert!(!xml.contains("extent"));

    let doc = json!({"mainVideoContent": {"http://zdf.de/rels/target": {"duration": 3600}}});
    let xml = Converter::new().to_dc_xml(&doc).unwrap();
    assert!(xml.contains("<dcterms:extent>01:00:00</dcterms:extent>"));
}

#[test]
fn test_unparsable_date_is_skipped() {
    let converter = Converter::new();
    let built = converter.dc_record(&json!({"editorialDate": "Montag", "title": "T"}));
    assert_eq!(built.warnings.len(), 1);
    assert_eq!(built.warnings[0].path, "$.editorialDate");

    let xml = converter.dc_xml(&built.record).unwrap();
    assert!(!xml.contains("created"));
    assert!(xml.contains(r#"<dc:title xml:lang="deu">T</dc:title>"#));
}

#[test]
fn test_record_list() {
    let converter = Converter::new().with_reformat(true);
    let mut list = DcRecordList::new();
    list.push(converter.dc_record(&film()).record);
    list.push(converter.dc_record(&json!({"title": "Zweiter Film"})).record);

    let xml = converter.dc_list_xml(&list).unwrap();
    assert!(xml.contains(r#"<ListRecords xmlns="http://www.openarchives.org/OAI/2.0/""#));
    assert_eq!(count(&xml, "<record>"), 2);
    assert_eq!(count(&xml, "xmlns:dc="), 1);
    assert!(xml.contains(r#"<dc:title xml:lang="deu">Zweiter Film</dc:title>"#));
}

#[test]
fn test_custom_defaults() {
    let defaults = RecordDefaults::default()
        .with_provider_id("oid42")
        .with_rights_url("https://example.org/rights")
        .with_format("video/mp4")
        .with_dc_language("English", "eng");
    let converter = Converter::new().with_defaults(defaults).with_reformat(true);
    let xml = converter.convert_str(MINIMAL_JSON, Variant::Dc).unwrap();

    let expected = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<record xmlns="http://www.openarchives.org/OAI/2.0/" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <dc:identifier type="providerId">oid42</dc:identifier>
  <dc:title xml:lang="eng">Beispiel</dc:title>
  <dc:description type="object" xml:lang="eng">FSK ab 0 freigegeben</dc:description>
  <dc:format>video/mp4</dc:format>
  <dc:language>English</dc:language>
  <dc:rights type="binary">https://example.org/rights</dc:rights>
</record>"#;
    assert_eq!(xml, expected);
}
