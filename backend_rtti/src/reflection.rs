use ir_lang::ClassID;
use ir_lang::ClassScope;
use ir_lang::Metadata;

/// Printable name of a class as reported by the runtime
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ReflectionInfo {
    pub package_name: Option<String>,
    pub relative_name: Option<String>,
}

impl ReflectionInfo {
    pub fn none() -> Self {
        Self {
            package_name: None,
            relative_name: None,
        }
    }
}

pub fn reflection_info(metadata: &Metadata, class: ClassID) -> ReflectionInfo {
    // boxes report the name of the value class they wrap
    let class = metadata.find_boxed_value_class(class).unwrap_or(class);
    let def = metadata.class_def(class);

    let simple_name = def.name.simple_name().to_string();

    match def.scope {
        ClassScope::Anonymous => ReflectionInfo::none(),

        ClassScope::Local => ReflectionInfo {
            package_name: None,
            relative_name: Some(simple_name),
        },

        ClassScope::Package | ClassScope::Nested(..) => {
            let mut parts = vec![simple_name.clone()];
            let mut outermost = def;

            while let ClassScope::Nested(outer) = outermost.scope {
                outermost = metadata.class_def(outer);
                parts.push(outermost.name.simple_name().to_string());
            }

            match outermost.scope {
                ClassScope::Package => {
                    parts.reverse();

                    ReflectionInfo {
                        package_name: Some(outermost.name.parent_parts().join(".")),
                        relative_name: Some(parts.join(".")),
                    }
                },

                // nested somewhere inside a local or anonymous class
                _ => ReflectionInfo {
                    package_name: None,
                    relative_name: Some(simple_name),
                },
            }
        },
    }
}
