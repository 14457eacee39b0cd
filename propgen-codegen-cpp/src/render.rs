//! Text fragments of `<Class>.h` and `<Class>.cpp`.

use propgen_codegen::builder::CodeBuilder;
use propgen_core::replace_wildcard;

/// C++ patterns are globs: `[any]` becomes `*`.
pub fn pattern(section: &str, name: &str) -> String {
    format!("{}.{}", section, replace_wildcard(name, "*"))
}

pub fn header_preamble(banner: &str, class_name: &str) -> String {
    let guard = format!("ICE_INTERNAL_{}_H", class_name);
    format!(
        r#"{banner}
#ifndef {guard}
#define {guard}

#include <Ice/Config.h>

namespace IceInternal
{{

struct Property
{{
    const char* pattern;
    bool deprecated;
    const char* deprecatedBy;

    Property(const char* n, bool d, const char* b) :
        pattern(n),
        deprecated(d),
        deprecatedBy(b)
    {{
    }}

    Property() :
        pattern(0),
        deprecated(false),
        deprecatedBy(0)
    {{
    }}

}};

struct PropertyArray
{{
    const Property* properties;
    const int length;

    PropertyArray(const Property* p, size_t len) :
        properties(p),
        length(static_cast<int>(len))
    {{
    }}
}};

class {class_name}
{{
public:

"#
    )
}

pub fn header_section(section: &str) -> String {
    format!("    static const PropertyArray {}Props;\n", section)
}

pub fn header_postamble() -> String {
    CodeBuilder::default()
        .blank()
        .indent()
        .line("static const PropertyArray validProps[];")
        .line("static const char * clPropNames[];")
        .dedent()
        .line("};")
        .blank()
        .line("}")
        .blank()
        .line("#endif")
        .build()
}

pub fn source_preamble(banner: &str, class_name: &str) -> String {
    format!("{}\n#include <Ice/{}.h>\n\n", banner, class_name)
}

pub fn source_section_open(section: &str) -> String {
    CodeBuilder::default()
        .line(&format!("const IceInternal::Property {}PropsData[] =", section))
        .line("{")
        .build()
}

pub fn source_property(
    section: &str,
    name: &str,
    deprecated: bool,
    deprecated_by: Option<&str>,
) -> String {
    let replacement = match deprecated_by {
        Some(by) => format!("\"{}\"", by),
        None => "0".to_string(),
    };
    format!(
        "    IceInternal::Property(\"{}\", {}, {}),\n",
        pattern(section, name),
        deprecated,
        replacement
    )
}

pub fn source_section_close(class_name: &str, section: &str) -> String {
    let data = format!("{}PropsData", section);
    format!(
        "}};\n\
         \n\
         const IceInternal::PropertyArray\n    \
         IceInternal::{class_name}::{section}Props({data},\n{pad}sizeof({data})/sizeof({data}[0]));\n\
         \n",
        pad = " ".repeat(48),
    )
}

/// `validProps` and `clPropNames`, closing the source file.
pub fn source_tables(class_name: &str, sections: &[String], command_line: &[String]) -> String {
    CodeBuilder::default()
        .blank()
        .line(&format!(
            "const IceInternal::PropertyArray IceInternal::{}::validProps[] =",
            class_name
        ))
        .block_with_close("{", "};", |b| {
            b.each(sections, |b, s| b.line(&format!("{}Props,", s)))
                .line("IceInternal::PropertyArray(0,0)")
        })
        .blank()
        .blank()
        .line(&format!(
            "const char* IceInternal::{}::clPropNames[] =",
            class_name
        ))
        .block_with_close("{", "};", |b| {
            b.each(command_line, |b, s| b.line(&format!("\"{}\",", s)))
                .line("0")
        })
        .blank()
        .build()
}
