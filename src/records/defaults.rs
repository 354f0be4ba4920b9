//! Fixed record content
//!
//! Values every record carries regardless of the source document: the data
//! provider, licences, media format and the OAI request description.

/// ISIL-like identifier of the data provider
pub const PROVIDER_ID: &str = "oid1616747773566";
/// Rights statement of every record
pub const RIGHTS_URL: &str = "https://www.deutsche-digitale-bibliothek.de/content/lizenzen/rv-fz";
/// Licence of the catalog metadata
pub const CATALOG_LICENCE_URL: &str = "http://creativecommons.org/publicdomain/zero/1.0/";
/// DCMI type of the described objects
pub const MOVING_IMAGE_TYPE: &str = "http://purl.org/dc/dcmitype/MovingImage";
/// Media type of the described objects
pub const MEDIA_FORMAT: &str = "video/vnd.ddbkultur.zdf";

/// Constants written into every record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDefaults {
    /// Data provider id, first DC identifier and RDF catalog creator
    pub provider_id: String,
    /// Rights / licence URL
    pub rights_url: String,
    /// Licence of the catalog record
    pub catalog_licence_url: String,
    /// `rdf:type` resource
    pub rdf_type: String,
    /// `dc:format` value
    pub format: String,
    /// `dc:language` of DC records
    pub dc_language: String,
    /// `dc:language` of RDF records
    pub rdf_language: String,
    /// `xml:lang` of DC element values
    pub dc_lang_code: String,
    /// `xml:lang` of RDF element values
    pub rdf_lang_code: String,
    /// Text of the OAI `request` element
    pub oai_base_url: String,
    /// OAI `verb` attribute
    pub oai_verb: String,
    /// OAI `metadataPrefix` attribute
    pub oai_metadata_prefix: String,
}

impl Default for RecordDefaults {
    fn default() -> Self {
        Self {
            provider_id: PROVIDER_ID.to_string(),
            rights_url: RIGHTS_URL.to_string(),
            catalog_licence_url: CATALOG_LICENCE_URL.to_string(),
            rdf_type: MOVING_IMAGE_TYPE.to_string(),
            format: MEDIA_FORMAT.to_string(),
            dc_language: "Deutsch".to_string(),
            rdf_language: "de".to_string(),
            dc_lang_code: "deu".to_string(),
            rdf_lang_code: "de".to_string(),
            oai_base_url: "https://api.zdf.de".to_string(),
            oai_verb: "ListRecords".to_string(),
            oai_metadata_prefix: "dc-ddb".to_string(),
        }
    }
}

impl RecordDefaults {
    /// Use another data provider id
    pub fn with_provider_id(mut self, provider_id: impl Into<String>) -> Self {
        self.provider_id = provider_id.into();
        self
    }

    /// Use another rights / licence URL
    pub fn with_rights_url(mut self, url: impl Into<String>) -> Self {
        self.rights_url = url.into();
        self
    }

    /// Use another media format
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Use other record languages, e.g. `("English", "eng")` for DC
    pub fn with_dc_language(
        mut self,
        language: impl Into<String>,
        lang_code: impl Into<String>,
    ) -> Self {
        self.dc_language = language.into();
        self.dc_lang_code = lang_code.into();
        self
    }

    /// Use another RDF language code for `dc:language` and `xml:lang`
    pub fn with_rdf_language(mut self, lang_code: impl Into<String>) -> Self {
        let lang_code = lang_code.into();
        self.rdf_language = lang_code.clone();
        self.rdf_lang_code = lang_code;
        self
    }

    /// Use another OAI endpoint and metadata prefix
    pub fn with_oai_request(
        mut self,
        base_url: impl Into<String>,
        metadata_prefix: impl Into<String>,
    ) -> Self {
        self.oai_base_url = base_url.into();
        self.oai_metadata_prefix = metadata_prefix.into();
        self
    }
}
