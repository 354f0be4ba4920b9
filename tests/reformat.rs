//! Namespace reformatting of arbitrary documents

mod fixtures;

use fixtures::{count, FILM_JSON};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use zdf2dc::core::MAX_DEPTH;
use zdf2dc::{ConvertError, Converter, NamespaceRegistry, Reformatter, Variant, XmlElement, XmlParser};

fn reformatter() -> Reformatter {
    Reformatter::new(Arc::new(NamespaceRegistry::new()))
}

/// Panic if any element below the root declares a namespace
fn assert_declarations_on_root_only(xml: &str) {
    let doc = XmlParser::new().parse(xml).unwrap();
    let nested: Vec<&XmlElement> = doc
        .root
        .descendants()
        .skip(1)
        .filter(|e| !e.namespaces.is_empty())
        .collect();
    assert!(nested.is_empty(), "nested declarations in:\n{}", xml);

    let mut prefixes: Vec<Option<&str>> =
        doc.root.namespaces.iter().map(|d| d.prefix.as_deref()).collect();
    let declared = prefixes.len();
    prefixes.sort();
    prefixes.dedup();
    assert_eq!(prefixes.len(), declared, "duplicate root declaration");
}

const MESSY: &str = r#"<?xml version="1.0"?>
<foo:RDF xmlns:foo="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:skos="http://www.w3.org/2004/02/skos/core#">
  <!-- harvested 2021-03-01 -->
  <foo:Description foo:about="urn:film:1">
    <terms:isReferencedBy xmlns:terms="http://purl.org/dc/terms/">
      <cat:CatalogRecord xmlns:cat="http://www.w3.org/ns/dcat#">
        <elements:creator xmlns:elements="http://purl.org/dc/elements/1.1/">oid1616747773566</elements:creator>
      </cat:CatalogRecord>
    </terms:isReferencedBy>
    <dc:title xmlns:dc="http://purl.org/dc/elements/1.1/" xml:lang="de">Titel &amp; Untertitel</dc:title>
    <x:note xmlns:x="urn:local:notes">frei</x:note>
  </foo:Description>
</foo:RDF>"#;

#[test]
fn test_messy_document() {
    let out = reformatter().reformat(MESSY).unwrap();

    let expected = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcat="http://www.w3.org/ns/dcat#" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:x="urn:local:notes">
  <!-- harvested 2021-03-01 -->
  <rdf:Description rdf:about="urn:film:1">
    <dcterms:isReferencedBy>
      <dcat:CatalogRecord>
        <dc:creator>oid1616747773566</dc:creator>
      </dcat:CatalogRecord>
    </dcterms:isReferencedBy>
    <dc:title xml:lang="de">Titel &amp; Untertitel</dc:title>
    <x:note>frei</x:note>
  </rdf:Description>
</rdf:RDF>"#;
    assert_eq!(out, expected);
}

#[test]
fn test_reformat_is_idempotent() {
    let reformatter = reformatter();
    let once = reformatter.reformat(MESSY).unwrap();
    assert_eq!(reformatter.reformat(&once).unwrap(), once);

    let converter = Converter::new();
    for variant in [Variant::Dc, Variant::Rdf, Variant::Oai] {
        let xml = converter.convert_str(FILM_JSON, variant).unwrap();
        let once = reformatter.reformat(&xml).unwrap();
        let twice = reformatter.reformat(&once).unwrap();
        assert_eq!(twice, once, "{}", variant);
    }
}

#[test]
fn test_declarations_only_on_root() {
    let inputs = [
        MESSY,
        r#"<a xmlns="urn:a"><b><c/></b><p:d xmlns:p="urn:p"/></a>"#,
        r#"<root><p:a xmlns:p="urn:one"/><p:b xmlns:p="urn:two"/></root>"#,
        r#"<oai:x xmlns:oai="http://www.openarchives.org/OAI/2.0/"><r:y xmlns:r="http://www.w3.org/1999/02/22-rdf-syntax-ns#" r:resource="z"/></oai:x>"#,
    ];
    let reformatter = reformatter();
    for input in inputs {
        assert_declarations_on_root_only(&reformatter.reformat(input).unwrap());
    }
}

#[test]
fn test_conflicting_default_namespace_is_local() {
    // A nested default binding that differs from the root's cannot move up
    let out = reformatter()
        .reformat(r#"<a xmlns="urn:a"><b xmlns="urn:b"><c/></b></a>"#)
        .unwrap();
    let doc = XmlParser::new().parse(&out).unwrap();
    let b = doc.root.elements().next().unwrap();
    assert_eq!(doc.root.name.namespace.as_deref(), Some("urn:a"));
    assert_eq!(b.name.namespace.as_deref(), Some("urn:b"));
    assert_eq!(
        b.elements().next().unwrap().name.namespace.as_deref(),
        Some("urn:b")
    );
    assert_eq!(count(&out, "xmlns="), 2);
}

#[test]
fn test_depth_limit() {
    let depth = MAX_DEPTH + 1;
    let xml = format!("{}{}", "<a>".repeat(depth), "</a>".repeat(depth));
    assert!(matches!(
        reformatter().reformat(&xml),
        Err(ConvertError::DepthLimit(limit)) if limit == MAX_DEPTH
    ));

    let shallow = XmlParser::new().with_max_depth(8);
    let xml = format!("{}{}", "<a>".repeat(9), "</a>".repeat(9));
    assert!(matches!(
        reformatter().with_parser(shallow).reformat(&xml),
        Err(ConvertError::DepthLimit(8))
    ));
}

#[test]
fn test_malformed_input() {
    let err = reformatter().reformat("<rdf:RDF>").unwrap_err();
    assert!(matches!(err, ConvertError::XmlParse(_)));
}
