//! Rendering of the generated project files

use crate::config::{Config, GhcVersion};
use anyhow::{Context, Result};
use heck::ToUpperCamelCase;
use serde::Serialize;
use std::collections::BTreeMap;

/// A generated file: path relative to the project root, and its contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

impl GeneratedFile {
    fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Haskell module name for a project: `my-cool-app` becomes `MyCoolApp`
pub fn module_name(project: &str) -> String {
    project.to_upper_camel_case()
}

/// Every file of the project, in a stable order
pub fn render(project: &str, config: &Config) -> Result<Vec<GeneratedFile>> {
    let module = module_name(project);
    let mut files = vec![
        GeneratedFile::new(format!("{}.cabal", project), cabal_file(project, &module, config)),
        GeneratedFile::new("README.md", readme(project, config)),
        GeneratedFile::new("CHANGELOG.md", changelog(project)),
        GeneratedFile::new("LICENSE", license_header(config)),
        GeneratedFile::new(".gitignore", GITIGNORE),
    ];

    if config.lib {
        files.push(GeneratedFile::new(
            format!("src/{}.hs", module),
            format!(
                "module {module}\n       ( someFunc\n       ) where\n\n\nsomeFunc :: IO ()\nsomeFunc = putStrLn (\"someFunc\" :: String)\n"
            ),
        ));
    }
    if config.exe {
        let body = if config.lib {
            format!("module Main (main) where\n\nimport {module} (someFunc)\n\n\nmain :: IO ()\nmain = someFunc\n")
        } else {
            "module Main (main) where\n\n\nmain :: IO ()\nmain = putStrLn (\"Hello, world!\" :: String)\n".to_string()
        };
        files.push(GeneratedFile::new("app/Main.hs", body));
    }
    if config.test {
        files.push(GeneratedFile::new(
            "test/Spec.hs",
            "module Main (main) where\n\n\nmain :: IO ()\nmain = putStrLn (\"Test suite is not implemented\" :: String)\n",
        ));
    }
    if config.bench {
        files.push(GeneratedFile::new(
            "benchmark/Main.hs",
            "module Main (main) where\n\n\nmain :: IO ()\nmain = putStrLn (\"Benchmarks are not implemented\" :: String)\n",
        ));
    }
    if config.bscript {
        files.push(GeneratedFile::new(
            "Setup.hs",
            "import Distribution.Simple\n\nmain :: IO ()\nmain = defaultMain\n",
        ));
    }
    if config.stack {
        files.push(GeneratedFile::new("stack.yaml", stack_yaml(&config.latest_ghc())?));
    }
    if config.travis {
        files.push(GeneratedFile::new(".travis.yml", travis_yaml(config)?));
    }
    if config.appveyor {
        files.push(GeneratedFile::new("appveyor.yml", appveyor_yaml(config)?));
    }

    Ok(files)
}

const GITIGNORE: &str = "\
dist/
dist-newstyle/
.stack-work/
.ghc.environment.*
cabal.project.local
*.hi
*.o
*.dyn_hi
*.dyn_o
*.prof
*.hp
tags
TAGS
";

fn cabal_file(project: &str, module: &str, config: &Config) -> String {
    let mut out = String::new();
    let tested_with: Vec<String> = config
        .ghc_versions
        .iter()
        .map(|v| format!("GHC == {}", v))
        .collect();

    out.push_str("cabal-version:       2.4\n");
    out.push_str(&format!("name:                {}\n", project));
    out.push_str("version:             0.0.0.0\n");
    out.push_str("synopsis:            See README for more info\n");
    out.push_str(&format!(
        "homepage:            https://github.com/{}/{}\n",
        config.owner, project
    ));
    out.push_str(&format!("license:             {}\n", config.license.spdx()));
    out.push_str("license-file:        LICENSE\n");
    out.push_str(&format!("author:              {}\n", config.full_name));
    out.push_str(&format!(
        "maintainer:          {} <{}>\n",
        config.full_name, config.email
    ));
    out.push_str(&format!("copyright:           {}\n", config.full_name));
    out.push_str(&format!(
        "build-type:          {}\n",
        if config.bscript { "Custom" } else { "Simple" }
    ));
    out.push_str("extra-doc-files:     README.md\n");
    out.push_str("                     CHANGELOG.md\n");
    out.push_str(&format!(
        "tested-with:         {}\n",
        tested_with.join("\n                     ")
    ));

    if config.bscript {
        out.push_str("\ncustom-setup\n  setup-depends:       base, Cabal\n");
    }

    out.push_str(&format!(
        "\nsource-repository head\n  type:                git\n  location:            https://github.com/{}/{}.git\n",
        config.owner, project
    ));

    out.push_str("\ncommon common-options\n");
    match &config.prelude {
        Some(prelude) => {
            out.push_str(&format!(
                "  build-depends:       base >= 4.9 && < 5\n                     , {}\n",
                prelude.package
            ));
            out.push_str(&format!(
                "  mixins:              base hiding (Prelude)\n                     , {} ({} as Prelude)\n",
                prelude.package, prelude.module
            ));
        }
        None => out.push_str("  build-depends:       base >= 4.9 && < 5\n"),
    }
    out.push_str(&format!(
        "  ghc-options:         {}\n",
        config.warnings.join("\n                       ")
    ));
    out.push_str("  default-language:    Haskell2010\n");
    if !config.extensions.is_empty() {
        out.push_str(&format!(
            "  default-extensions:  {}\n",
            config.extensions.join("\n                       ")
        ));
    }

    if config.lib {
        out.push_str(&format!(
            "\nlibrary\n  import:              common-options\n  hs-source-dirs:      src\n  exposed-modules:     {}\n",
            module
        ));
    }

    let internal_dep = if config.lib {
        format!("  build-depends:       {}\n", project)
    } else {
        String::new()
    };
    let threaded = "  ghc-options:         -threaded\n                       -rtsopts\n                       -with-rtsopts=-N\n";

    if config.exe {
        out.push_str(&format!(
            "\nexecutable {}\n  import:              common-options\n  hs-source-dirs:      app\n  main-is:             Main.hs\n{}{}",
            project, internal_dep, threaded
        ));
    }
    if config.test {
        out.push_str(&format!(
            "\ntest-suite {}-test\n  import:              common-options\n  type:                exitcode-stdio-1.0\n  hs-source-dirs:      test\n  main-is:             Spec.hs\n{}{}",
            project, internal_dep, threaded
        ));
    }
    if config.bench {
        out.push_str(&format!(
            "\nbenchmark {}-benchmark\n  import:              common-options\n  type:                exitcode-stdio-1.0\n  hs-source-dirs:      benchmark\n  main-is:             Main.hs\n{}{}",
            project, internal_dep, threaded
        ));
    }

    out
}

fn readme(project: &str, config: &Config) -> String {
    let mut out = format!("# {}\n\n", project);
    if config.travis {
        out.push_str(&format!(
            "[![Build status](https://img.shields.io/travis/{owner}/{project}.svg?logo=travis)](https://travis-ci.org/{owner}/{project})\n",
            owner = config.owner,
            project = project
        ));
    }
    if config.appveyor {
        out.push_str(&format!(
            "[![Windows build status](https://ci.appveyor.com/api/projects/status/github/{}/{}?branch=master&svg=true)](https://ci.appveyor.com/project/{}/{})\n",
            config.owner, project, config.owner, project
        ));
    }
    out.push_str(&format!(
        "[![{lic} license](https://img.shields.io/badge/license-{badge}-blue.svg)](LICENSE)\n\nSee README for more info\n",
        lic = config.license,
        badge = config.license.name().replace('-', "--")
    ));
    out
}

fn changelog(project: &str) -> String {
    format!(
        "# Changelog\n\n`{}` uses [PVP Versioning][1].\n\n## 0.0.0.0\n\n* Initially created.\n\n[1]: https://pvp.haskell.org\n",
        project
    )
}

/// Placeholder license header; the license text itself is fetched elsewhere
fn license_header(config: &Config) -> String {
    format!(
        "{}\n\nCopyright (c) {}\n",
        config.license.spdx(),
        config.full_name
    )
}

#[derive(Serialize)]
struct StackYaml {
    resolver: String,
}

fn stack_yaml(ghc: &GhcVersion) -> Result<String> {
    serde_yaml::to_string(&StackYaml {
        resolver: ghc.stack_resolver(),
    })
    .context("Failed to render stack.yaml")
}

#[derive(Serialize)]
struct TravisYaml {
    language: &'static str,
    git: BTreeMap<&'static str, u32>,
    cache: TravisCache,
    matrix: TravisMatrix,
    install: Vec<String>,
    script: Vec<String>,
    notifications: BTreeMap<&'static str, bool>,
}

#[derive(Serialize)]
struct TravisCache {
    directories: Vec<&'static str>,
}

#[derive(Serialize)]
struct TravisMatrix {
    include: Vec<TravisJob>,
}

#[derive(Serialize)]
struct TravisJob {
    ghc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    env: Option<String>,
}

fn travis_yaml(config: &Config) -> Result<String> {
    let mut include = Vec::new();
    if config.cabal {
        include.extend(config.ghc_versions.iter().map(|v| TravisJob {
            ghc: v.to_string(),
            env: None,
        }));
    }
    if config.stack {
        include.push(TravisJob {
            ghc: config.latest_ghc().to_string(),
            env: Some("STACK_YAML=\"$TRAVIS_BUILD_DIR/stack.yaml\"".to_string()),
        });
    }

    let (install, script) = if config.cabal && !config.stack {
        (
            vec!["cabal v2-update".to_string(), "cabal v2-build --enable-tests --enable-benchmarks".to_string()],
            vec!["cabal v2-test --enable-tests".to_string()],
        )
    } else if config.stack && !config.cabal {
        (
            vec!["curl -sSL https://get.haskellstack.org/ | sh".to_string(), "stack build --test --bench --no-run-tests --no-run-benchmarks".to_string()],
            vec!["stack test --no-terminal".to_string()],
        )
    } else {
        (
            vec![
                "if [ -z \"$STACK_YAML\" ]; then cabal v2-update && cabal v2-build --enable-tests --enable-benchmarks; else curl -sSL https://get.haskellstack.org/ | sh && stack build --test --bench --no-run-tests --no-run-benchmarks; fi".to_string(),
            ],
            vec!["if [ -z \"$STACK_YAML\" ]; then cabal v2-test --enable-tests; else stack test --no-terminal; fi".to_string()],
        )
    };

    let travis = TravisYaml {
        language: "haskell",
        git: BTreeMap::from([("depth", 5)]),
        cache: TravisCache {
            directories: vec!["$HOME/.cabal/store", "$HOME/.stack", "$TRAVIS_BUILD_DIR/.stack-work"],
        },
        matrix: TravisMatrix { include },
        install,
        script,
        notifications: BTreeMap::from([("email", false)]),
    };
    serde_yaml::to_string(&travis).context("Failed to render .travis.yml")
}

#[derive(Serialize)]
struct AppveyorYaml {
    clone_folder: &'static str,
    environment: BTreeMap<&'static str, String>,
    cache: Vec<&'static str>,
    install: Vec<String>,
    build_script: Vec<String>,
    test_script: Vec<String>,
}

fn appveyor_yaml(config: &Config) -> Result<String> {
    let ghc = config.latest_ghc();
    let (build, test) = if config.cabal {
        (
            "cabal v2-build --enable-tests --enable-benchmarks",
            "cabal v2-test --enable-tests",
        )
    } else {
        ("stack build --test --bench --no-run-tests --no-run-benchmarks", "stack test")
    };

    let appveyor = AppveyorYaml {
        clone_folder: "C:\\project",
        environment: BTreeMap::from([("GHCVER", ghc.to_string())]),
        cache: vec!["C:\\cabal\\store", "C:\\sr"],
        install: vec![
            "choco source add -n mistuke -s https://www.myget.org/F/mistuke/api/v2".to_string(),
            format!("choco install -y ghc --version {} --ignore-dependencies", ghc),
            "choco install -y cabal-head -pre".to_string(),
            "refreshenv".to_string(),
            "cabal v2-update".to_string(),
        ],
        build_script: vec![build.to_string()],
        test_script: vec![test.to_string()],
    };
    serde_yaml::to_string(&appveyor).context("Failed to render appveyor.yml")
}
