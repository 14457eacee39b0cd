//! End-to-end tests for the C++ backend: schema in, staged files out.

use std::fs;

use propgen_codegen::{Emitter, SectionFilter};
use propgen_codegen_cpp::CppEmitter;
use propgen_schema::SchemaFile;
use tempfile::TempDir;

const SCHEMA: &str = r#"<?xml version="1.0"?>
<properties>
  <class name="proxy" prefix-only="false">
    <suffix name="Locator" />
    <suffix name="Router" deprecatedBy="Routers" />
  </class>
  <section name="Ice">
    <property name="Default.Locator" class="proxy" />
    <property name="Admin.[any]" />
    <property name="ThreadPool.Server" deprecated="true" />
  </section>
  <section name="IceBox" noCmdLine="true">
    <property name="ServiceManager.Endpoints" />
  </section>
</properties>
"#;

/// Run the C++ emitter over `xml` and return the header and source text.
fn generate(xml: &str, sections: SectionFilter) -> (String, String) {
    let temp = TempDir::new().unwrap();
    let schema = SchemaFile::from_source("config/PropertyNames.xml", xml).unwrap();
    let classes = schema.classes().unwrap();
    let mut cpp = CppEmitter::new(
        CppEmitter::default_options(schema.class_name(), &schema.file_name())
            .with_staging_dir(temp.path())
            .with_sections(sections),
    );

    cpp.start_files().unwrap();
    for event in schema.events(&classes) {
        cpp.dispatch(&event.unwrap()).unwrap();
    }

    let header = fs::read_to_string(temp.path().join("PropertyNames.h")).unwrap();
    let source = fs::read_to_string(temp.path().join("PropertyNames.cpp")).unwrap();
    (header, source)
}

#[test]
fn test_source_file() {
    let (_, source) = generate(SCHEMA, SectionFilter::All);
    insta::assert_snapshot!(source, @r#"
    // Generated by propgen from file PropertyNames.xml
    //
    // IMPORTANT: Do not edit this file -- any edits made here will be lost!

    #include <Ice/PropertyNames.h>

    const IceInternal::Property IcePropsData[] =
    {
        IceInternal::Property("Ice.Default.Locator.Locator", false, 0),
        IceInternal::Property("Ice.Default.Locator.Router", true, "Ice.Default.Locator.Routers"),
        IceInternal::Property("Ice.Default.Locator", false, 0),
        IceInternal::Property("Ice.Admin.*", false, 0),
        IceInternal::Property("Ice.ThreadPool.Server", true, 0),
    };

    const IceInternal::PropertyArray
        IceInternal::PropertyNames::IceProps(IcePropsData,
                                                    sizeof(IcePropsData)/sizeof(IcePropsData[0]));

    const IceInternal::Property IceBoxPropsData[] =
    {
        IceInternal::Property("IceBox.ServiceManager.Endpoints", false, 0),
    };

    const IceInternal::PropertyArray
        IceInternal::PropertyNames::IceBoxProps(IceBoxPropsData,
                                                    sizeof(IceBoxPropsData)/sizeof(IceBoxPropsData[0]));


    const IceInternal::PropertyArray IceInternal::PropertyNames::validProps[] =
    {
        IceProps,
        IceBoxProps,
        IceInternal::PropertyArray(0,0)
    };


    const char* IceInternal::PropertyNames::clPropNames[] =
    {
        "Ice",
        0
    };
    "#);
}

#[test]
fn test_header_declares_sections() {
    let (header, _) = generate(SCHEMA, SectionFilter::All);

    assert!(header.starts_with("// Generated by propgen from file PropertyNames.xml\n"));
    assert!(header.contains("#ifndef ICE_INTERNAL_PropertyNames_H\n"));
    assert!(header.contains("class PropertyNames\n{\npublic:\n"));
    assert!(header.ends_with(
        "    static const PropertyArray IceProps;\n\
         \x20   static const PropertyArray IceBoxProps;\n\
         \n\
         \x20   static const PropertyArray validProps[];\n\
         \x20   static const char * clPropNames[];\n\
         };\n\
         \n\
         }\n\
         \n\
         #endif\n"
    ));
}

#[test]
fn test_no_command_line_section_is_excluded() {
    let (_, source) = generate(SCHEMA, SectionFilter::All);
    let cl_names = source.split("clPropNames[] =").nth(1).unwrap();
    assert!(cl_names.contains("\"Ice\""));
    assert!(!cl_names.contains("\"IceBox\""));
}

#[test]
fn test_selective_sections() {
    let xml = r#"<properties>
      <section name="Ice"><property name="Trace" /></section>
      <section name="Other"><property name="Hidden" /></section>
    </properties>"#;

    let (header, source) = generate(xml, SectionFilter::only(["Ice"]));

    assert!(header.contains("IceProps;"));
    assert!(!header.contains("OtherProps"));
    assert!(source.contains("\"Ice.Trace\""));
    assert!(!source.contains("Other"));
    assert!(!source.contains("Hidden"));
}

#[test]
fn test_regeneration_is_byte_identical() {
    assert_eq!(
        generate(SCHEMA, SectionFilter::All),
        generate(SCHEMA, SectionFilter::All)
    );
}

#[test]
fn test_cleanup_removes_partial_output() {
    let temp = TempDir::new().unwrap();
    let mut cpp = CppEmitter::new(
        CppEmitter::default_options("PropertyNames", "PropertyNames.xml")
            .with_staging_dir(temp.path()),
    );
    cpp.start_files().unwrap();
    cpp.new_section(&propgen_schema::Section::new("Ice", true))
        .unwrap();
    cpp.property("Trace", false, None).unwrap();

    cpp.cleanup().unwrap();
    cpp.cleanup().unwrap();

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}
