//! Built-in content for every generated file.
//!
//! Used whenever the resolved template does not provide its own version of a
//! logical file, and always for the helper scripts.

use indexmap::IndexMap;

use crate::config::ExtensionConfig;
use crate::constants::SHELL_VERSIONS;
use crate::error::{Error, Result};
use crate::metadata::{Metadata, PackageJson};
use crate::template::{BuildSystem, Variant};

/// Everything a generator or template may interpolate.
#[derive(Debug, Clone, Copy)]
pub struct Scaffold<'a> {
    pub config: &'a ExtensionConfig,
    pub variant: Variant,
    pub build: BuildSystem,
}

impl Scaffold<'_> {
    /// Template rendering context: the config fields plus the run's choices.
    pub fn context(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.config.name,
            "dir_name": self.config.dir_name,
            "uuid": self.config.uuid,
            "description": self.config.description,
            "class_name": self.config.class_name,
            "settings_schema": self.config.settings_schema,
            "variant": self.variant.as_str(),
            "bundler": self.build.is_bundler(),
            "shell_versions": SHELL_VERSIONS,
        })
    }
}

/// Produces the full content of one logical file.
pub type Generator = fn(&Scaffold) -> Result<String>;

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::MetadataError(e.to_string()))?;
    json.push('\n');
    Ok(json)
}

fn entries(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

pub fn package_json(scaffold: &Scaffold) -> Result<String> {
    let (build, pack) = match scaffold.build {
        BuildSystem::Bundler => ("node esbuild.js", "node esbuild.js"),
        BuildSystem::Compiler => ("bash scripts/build.sh", "bash scripts/pack.sh"),
    };
    let scripts = entries(&[
        ("clear", "rm -rf dist"),
        ("build", build),
        ("rebuild", "npm run clear && npm run build"),
        ("pack", pack),
        ("install-extension", "bash scripts/install.sh"),
        ("dev", "bash scripts/dev.sh"),
        ("dev:watch", "nodemon --watch src -e ts,json --exec npm run dev"),
        ("validate", "tsc --noEmit"),
    ]);

    let mut dev_dependencies = entries(&[
        ("@girs/gnome-shell", "^48.0.0"),
        ("@girs/gjs", "^4.0.0-beta.23"),
        ("@girs/st-16", "^16.0.0-4.0.0-beta.23"),
        ("@girs/gobject-2.0", "^2.84.0-4.0.0-beta.23"),
        ("typescript", "^5.3.0"),
        ("nodemon", "^3.0.1"),
    ]);
    if scaffold.build.is_bundler() {
        dev_dependencies.extend(entries(&[
            ("adm-zip", "^0.5.16"),
            ("esbuild", "^0.25.1"),
            ("fs-extra", "^11.3.0"),
        ]));
    }

    to_pretty_json(&PackageJson {
        name: scaffold.config.dir_name.clone(),
        version: "1.0.0".to_string(),
        description: scaffold.config.description.clone(),
        module_type: "module".to_string(),
        scripts,
        dev_dependencies,
    })
}

pub fn metadata_json(scaffold: &Scaffold) -> Result<String> {
    to_pretty_json(&Metadata::from_config(scaffold.config))
}

pub fn tsconfig_json(_scaffold: &Scaffold) -> Result<String> {
    Ok(r#"{
  "compilerOptions": {
    "target": "ES2022",
    "module": "ESNext",
    "moduleResolution": "Bundler",
    "lib": ["ESNext"],
    "strict": true,
    "noImplicitAny": true,
    "noImplicitThis": true,
    "alwaysStrict": true,
    "strictNullChecks": true,
    "strictPropertyInitialization": true,
    "noUnusedLocals": true,
    "noUnusedParameters": true,
    "noImplicitReturns": true,
    "noFallthroughCasesInSwitch": true,
    "outDir": "dist",
    "sourceMap": true,
    "forceConsistentCasingInFileNames": true
  },
  "include": ["src/**/*"],
  "files": ["src/extension.ts"]
}
"#
    .to_string())
}

pub fn esbuild_js(_scaffold: &Scaffold) -> Result<String> {
    Ok(r#"import { build } from 'esbuild';
import { copyFileSync, readFileSync, existsSync, mkdirSync } from 'fs';
import { resolve, dirname } from 'path';
import { fileURLToPath } from 'url';
import fs from 'fs-extra';
import AdmZip from 'adm-zip';

const __dirname = dirname(fileURLToPath(import.meta.url));
const metadata = JSON.parse(readFileSync('./src/metadata.json', 'utf8'));

console.debug(`Building ${metadata.name}...`);

build({
    entryPoints: ['src/extension.ts'],
    outdir: 'dist',
    bundle: true,
    // enable() and disable() must survive bundling
    treeShaking: false,
    target: 'firefox78',
    platform: 'neutral',
    format: 'esm',
    sourcemap: true,
    external: ['gi://*', 'resource://*', 'system', 'gettext', 'cairo'],
}).then(() => {
    const metaSrc = resolve(__dirname, 'src/metadata.json');
    const metaDist = resolve(__dirname, 'dist/metadata.json');
    const zipFilename = `${metadata.uuid}.zip`;
    const zipDist = resolve(__dirname, zipFilename);
    copyFileSync(metaSrc, metaDist);

    try {
      if (existsSync('src/assets')) {
        mkdirSync('dist/assets', { recursive: true });
        fs.copySync('src/assets', 'dist/assets');
      }
      if (existsSync('src/stylesheet.css')) {
        copyFileSync('src/stylesheet.css', 'dist/stylesheet.css');
      }
    } catch (error) {
      console.log('Error copying assets:', error);
    }

    const zip = new AdmZip();
    zip.addLocalFolder(resolve(__dirname, 'dist'));
    zip.writeZip(zipDist);

    console.log(`Build complete. Zip file: ${zipFilename}\n`);
    console.log(`Install with: gnome-extensions install ${zipFilename}`);
    console.log(`Update with: gnome-extensions install --force ${zipFilename}`);
    console.log(`Enable with: gnome-extensions enable ${metadata.uuid}`);
    console.log('\nUse the dev command for testing in a nested GNOME Shell.');
});
"#
    .to_string())
}

pub fn extension_ts(scaffold: &Scaffold) -> Result<String> {
    let class_name = &scaffold.config.class_name;
    let content = match scaffold.variant {
        Variant::Basic => format!(
            r#"import '@girs/gjs';
import '@girs/gnome-shell/extensions/global';
import {{ Extension, type ConsoleLike }} from '@girs/gnome-shell/extensions/extension';

export default class {class_name} extends Extension {{
  private _console: ConsoleLike | null = null;

  override enable() {{
    this._console = this.getLogger();
    this._console.log(`${{this.metadata.name}} enabled`);
  }}

  override disable() {{
    this._console?.log(`${{this.metadata.name}} disabled`);
    this._console = null;
  }}
}}
"#
        ),
        Variant::Indicator => format!(
            r#"import '@girs/gjs';
import St from '@girs/st-16';

import '@girs/gnome-shell/extensions/global';
import {{ Extension, gettext as _, type ConsoleLike }} from '@girs/gnome-shell/extensions/extension';
import PanelMenu from '@girs/gnome-shell/ui/panelMenu';
import * as Main from '@girs/gnome-shell/ui/main';
import PopupMenu from '@girs/gnome-shell/ui/popupMenu';

export default class {class_name} extends Extension {{
  private _indicator: PanelMenu.Button | null = null;
  private _console: ConsoleLike | null = null;

  override enable() {{
    this._console = this.getLogger();

    this._indicator = new PanelMenu.Button(0.0, this.metadata.name, false);

    const icon = new St.Icon({{
      icon_name: 'dialog-information-symbolic',
      style_class: 'system-status-icon',
    }});
    this._indicator.add_child(icon);

    const menuItem = new PopupMenu.PopupMenuItem(_('Hello World'));
    menuItem.connect('activate', () => {{
      this._console?.log('Menu item clicked');
    }});
    this._indicator.menu.addMenuItem(menuItem);

    Main.panel.addToStatusArea(this.uuid, this._indicator);

    this._console.log(`${{this.metadata.name}} enabled`);
  }}

  override disable() {{
    if (this._indicator) {{
      this._indicator.destroy();
      this._indicator = null;
    }}

    this._console?.log(`${{this.metadata.name}} disabled`);
    this._console = null;
  }}
}}
"#
        ),
    };
    Ok(content)
}

/// Command the helper scripts use to produce `<uuid>.zip`.
fn pack_command(build: BuildSystem) -> &'static str {
    match build {
        BuildSystem::Bundler => "npm run build",
        BuildSystem::Compiler => "npm run build && npm run pack",
    }
}

/// Quotes `uuid` as a single shell word for the `EXTENSION_UUID` assignment.
///
/// # Errors
/// * `Error::ValidationError` if the UUID contains a nul byte
pub fn shell_uuid(uuid: &str) -> Result<String> {
    shlex::try_quote(uuid)
        .map(|quoted| quoted.into_owned())
        .map_err(|e| {
            Error::ValidationError(format!(
                "UUID '{}' cannot be used in a script: {}",
                uuid.escape_default(),
                e
            ))
        })
}

pub fn install_script(uuid: &str, build: BuildSystem) -> Result<String> {
    let uuid = shell_uuid(uuid)?;
    let pack = pack_command(build);
    Ok(format!(
        r#"#!/bin/bash
set -e
cd "$(dirname "$0")/.."

EXTENSION_UUID={uuid}

echo "Installing extension..."
if [ ! -f "$EXTENSION_UUID.zip" ]; then
  echo "Building extension first..."
  {pack}
fi

gnome-extensions install "$EXTENSION_UUID.zip" \
  --force

echo "Extension installed!"
echo "You can enable it with: gnome-extensions enable $EXTENSION_UUID"
"#
    ))
}

pub fn dev_script(uuid: &str, build: BuildSystem) -> Result<String> {
    let uuid = shell_uuid(uuid)?;
    let rebuild = match build {
        BuildSystem::Bundler => "npm run rebuild",
        BuildSystem::Compiler => "npm run rebuild && npm run pack",
    };
    Ok(format!(
        r#"#!/bin/bash
cd "$(dirname "$0")/.."

RESOLUTION=${{1:-"1920x1080"}}
MONITORS=${{2:-1}}
EXTENSION_UUID={uuid}

echo "Starting nested GNOME Shell with resolution: $RESOLUTION ($MONITORS monitor(s))"
echo "Extension UUID: $EXTENSION_UUID"

{rebuild}
bash scripts/install.sh

MUTTER_DEBUG_NUM_DUMMY_MONITORS=$MONITORS MUTTER_DEBUG_DUMMY_MODE_SPECS=$RESOLUTION dbus-run-session -- gnome-shell --nested --wayland &
SHELL_PID=$!

sleep 2

gnome-terminal --app-id=org.gnome.Terminal.GnomeShell -- bash -c 'gnome-extensions enable "$1"; echo "Extension enabled! Press Ctrl+D to exit."; exec bash' bash "$EXTENSION_UUID"

wait $SHELL_PID
"#
    ))
}

pub fn build_script() -> String {
    r#"#!/bin/bash
set -e
cd "$(dirname "$0")/.."

echo "Building extension..."
rm -rf dist
mkdir -p dist
npx tsc
cp src/metadata.json dist/metadata.json
if [ -d src/assets ]; then
  cp -r src/assets dist/assets
fi
if [ -f src/stylesheet.css ]; then
  cp src/stylesheet.css dist/stylesheet.css
fi
echo "Build complete!"
"#
    .to_string()
}

pub fn pack_script(uuid: &str) -> Result<String> {
    let uuid = shell_uuid(uuid)?;
    Ok(format!(
        r#"#!/bin/bash
set -e
cd "$(dirname "$0")/.."

EXTENSION_UUID={uuid}

if [ ! -d dist ]; then
  echo "dist directory not found. Run the build first." >&2
  exit 1
fi

gnome-extensions pack dist --force --out-dir .
mv -f "$EXTENSION_UUID.shell-extension.zip" "$EXTENSION_UUID.zip"
echo "Package created: $EXTENSION_UUID.zip"
"#
    ))
}

/// Helper scripts for the project, as `(path relative to the project, content)`.
///
/// The build and pack helpers exist only for the compiler build system; the
/// bundler config does both itself.
pub fn helper_scripts(scaffold: &Scaffold) -> Result<Vec<(&'static str, String)>> {
    let uuid = &scaffold.config.uuid;
    let mut scripts = vec![
        ("scripts/install.sh", install_script(uuid, scaffold.build)?),
        ("scripts/dev.sh", dev_script(uuid, scaffold.build)?),
    ];
    if !scaffold.build.is_bundler() {
        scripts.push(("scripts/build.sh", build_script()));
        scripts.push(("scripts/pack.sh", pack_script(uuid)?));
    }
    Ok(scripts)
}
