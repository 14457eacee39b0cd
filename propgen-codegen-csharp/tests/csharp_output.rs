use std::fs;

use propgen_codegen::{Emitter, SectionFilter};
use propgen_codegen_csharp::CSharpEmitter;
use propgen_schema::{SchemaFile, Section};
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

fn generate(xml: &str, sections: SectionFilter) -> String {
    let temp = TempDir::new().unwrap();
    let schema = SchemaFile::from_source("PropertyNames.xml", xml).unwrap();
    let classes = schema.classes().unwrap();
    let mut cs = CSharpEmitter::new(
        CSharpEmitter::default_options(schema.class_name(), &schema.file_name())
            .with_staging_dir(temp.path())
            .with_sections(sections),
    );

    cs.start_files().unwrap();
    for event in schema.events(&classes) {
        cs.dispatch(&event.unwrap()).unwrap();
    }

    fs::read_to_string(temp.path().join("PropertyNames.cs")).unwrap()
}

#[test]
fn test_csharp_file() {
    insta::assert_snapshot!(generate(SCHEMA, SectionFilter::All), @r#"
    // Generated by propgen from file PropertyNames.xml
    //
    // IMPORTANT: Do not edit this file -- any edits made here will be lost!

    namespace IceInternal
    {
        public sealed class PropertyNames
        {
            public static Property[] IceProps =
            {
                 new Property(@"^Ice\.Default\.Locator\.Locator$", false, null),
                 new Property(@"^Ice\.Default\.Locator\.Router$", true, @"Ice.Default.Locator.Routers"),
                 new Property(@"^Ice\.Default\.Locator$", false, null),
                 new Property(@"^Ice\.Admin\.[^\s]+$", false, null),
                 new Property(@"^Ice\.ThreadPool\.Server$", true, null),
                 null
            };

            public static Property[] IceBoxProps =
            {
                 new Property(@"^IceBox\.ServiceManager\.Endpoints$", false, null),
                 null
            };

            public static Property[][] validProps =
            {
                IceProps,
                IceBoxProps,
                null
            };

            public static string[] clPropNames =
            {
                "Ice",
                null
            };
        }
    }
    "#);
}

#[test]
fn test_no_command_line_section_is_excluded() {
    let cs = generate(SCHEMA, SectionFilter::All);
    let cl_names = cs.split("clPropNames =").nth(1).unwrap();
    assert!(!cl_names.contains("IceBox"));
}

#[test]
fn test_selective_sections() {
    let xml = r#"<properties>
      <section name="Ice"><property name="Trace" /></section>
      <section name="Other"><property name="Hidden" /></section>
    </properties>"#;

    let cs = generate(xml, SectionFilter::only(["Ice"]));

    assert!(cs.contains(r#"new Property(@"^Ice\.Trace$", false, null),"#));
    assert!(!cs.contains("Other"));
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
    let mut cs = CSharpEmitter::new(
        CSharpEmitter::default_options("PropertyNames", "PropertyNames.xml")
            .with_staging_dir(temp.path()),
    );
    cs.start_files().unwrap();
    cs.new_section(&Section::new("Ice", true)).unwrap();
    cs.property("Trace", false, None).unwrap();

    cs.cleanup().unwrap();

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}
