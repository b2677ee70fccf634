use convert_case::{Case, Casing};
use proc_macro2::Ident;
use syn::{Field, LitStr, parse::ParseBuffer};

pub(crate) struct FieldMetadata {
    pub(crate) ident: Ident,
    pub(crate) name: String,
    /// Camel-case spelling of `name`, present only when it differs.
    pub(crate) alias: Option<String>,
    pub(crate) skip: bool,
    pub(crate) nested: bool,
}

pub(crate) fn decode_field(field: &Field) -> FieldMetadata {
    let ident = field
        .ident
        .clone()
        .expect("Field is expected to have a name");
    let mut metadata = FieldMetadata {
        name: ident.to_string(),
        ident,
        alias: None,
        skip: false,
        nested: false,
    };
    if metadata.name.starts_with('_') {
        metadata.name.remove(0);
    }
    for attr in &field.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("fetch") {
            let Ok(list) = meta.require_list() else {
                panic!("Error while parsing `fetch`, use it like: `#[fetch(attribute, ...)]`");
            };
            let _ = list.parse_nested_meta(|arg| {
                if arg.path.is_ident("skip") {
                    let Err(..) = arg.value() else {
                        panic!("Error while parsing `skip`, use it like: `#[fetch(skip)]`");
                    };
                    metadata.skip = true;
                } else if arg.path.is_ident("nested") {
                    let Err(..) = arg.value() else {
                        panic!("Error while parsing `nested`, use it like: `#[fetch(nested)]`");
                    };
                    metadata.nested = true;
                } else if arg.path.is_ident("rename") {
                    let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!(
                            "Error while parsing `rename`, use it like: `#[fetch(rename = \"myName\")]`"
                        );
                    };
                    metadata.name = v.value();
                } else {
                    panic!(
                        "Unknown attribute `{}` inside fetch macro",
                        arg.path.get_ident().map(Ident::to_string).unwrap_or_default()
                    );
                }
                Ok(())
            });
        }
    }
    let camel = metadata.name.to_case(Case::Camel);
    if camel != metadata.name {
        metadata.alias = Some(camel);
    }
    metadata
}
