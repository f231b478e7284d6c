use apigen_core::ir::SpecDocument;
use apigen_core::{CodeGenerator, FileManifest, GenerateOptions, GenerationError, Language};
use minijinja::context;

use crate::render;

use super::class_name;

const CLIENT_TEMPLATE: &str = include_str!("../../templates/csharp/client.cs.j2");

/// C# backend: top-level `.cs` files plus a `.csproj` named after the
/// PascalCase package name, which doubles as the namespace.
pub struct CsharpGenerator;

impl CodeGenerator for CsharpGenerator {
    fn language(&self) -> Language {
        Language::Csharp
    }

    fn generate(
        &self,
        ir: &SpecDocument,
        options: &GenerateOptions,
    ) -> Result<FileManifest, GenerationError> {
        let namespace = class_name(options);

        let mut manifest = FileManifest::new();
        manifest.insert("Client.cs", self.generate_client(ir, options)?);
        manifest.insert("Models.cs", self.generate_models(ir, options)?);
        manifest.insert(
            "Retry.cs",
            ir.retry.render_code_in(&namespace, Language::Csharp),
        );
        manifest.insert(
            "Timeouts.cs",
            ir.timeout.render_code_in(&namespace, Language::Csharp),
        );
        manifest.insert(format!("{namespace}.csproj"), csproj());
        if options.include_docs {
            manifest.insert("README.md", readme(ir));
        }
        if options.include_tests {
            manifest.insert("ClientTests.cs", test_stub(&namespace));
        }
        Ok(manifest)
    }

    fn generate_client(
        &self,
        ir: &SpecDocument,
        options: &GenerateOptions,
    ) -> Result<String, GenerationError> {
        render::template(
            Language::Csharp,
            "client.cs.j2",
            CLIENT_TEMPLATE,
            context! {
                title => ir.info.title.clone(),
                namespace => class_name(options),
                base_url => ir.base_url(),
            },
        )
    }

    fn generate_models(
        &self,
        _ir: &SpecDocument,
        options: &GenerateOptions,
    ) -> Result<String, GenerationError> {
        Ok(format!(
            "namespace {}.Models\n{{\n}}\n",
            class_name(options)
        ))
    }
}

fn csproj() -> String {
    "<Project Sdk=\"Microsoft.NET.Sdk\">\n  <PropertyGroup>\n    \
     <TargetFramework>net8.0</TargetFramework>\n  </PropertyGroup>\n  <ItemGroup>\n    \
     <PackageReference Include=\"System.Net.Http.Json\" Version=\"8.0.0\" />\n  \
     </ItemGroup>\n</Project>\n"
        .to_string()
}

fn readme(ir: &SpecDocument) -> String {
    let description = ir.info.description.as_deref().unwrap_or("C# .NET client");
    format!(
        "# {title}\n\n{description}\n\nGenerated C# client (API version {version}).\n\n\
         ## Usage\n\n```csharp\nvar client = new Client(apiKey: \"...\");\n\
         var response = await client.GetAsync(\"/\");\n```\n",
        title = ir.info.title,
        version = ir.info.version,
    )
}

fn test_stub(namespace: &str) -> String {
    format!(
        "using {namespace};\n\npublic static class ClientTests\n{{\n    \
         public static void Main()\n    {{\n        \
         var client = new Client();\n        \
         System.Console.WriteLine(\"client defaults ok\");\n    }}\n}}\n"
    )
}
