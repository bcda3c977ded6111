// src/constants.rs

/// The package manifest every target project must have at its root.
pub const PACKAGE_JSON_FILENAME: &str = "package.json";

/// Presence of this file in the project root makes TypeScript the default.
pub const TSCONFIG_FILENAME: &str = "tsconfig.json";

/// The extension a GraphQL schema file must carry.
pub const GRAPHQL_EXTENSION: &str = ".graphql";

/// The file name of the default schema file, placed in the source root.
pub const DEFAULT_SCHEMA_FILENAME: &str = "schema.graphql";

/// The folder name relay-compiler expects as the last artifact directory segment.
pub const ARTIFACT_DIRECTORY_NAME: &str = "__generated__";

/// Next.js treats every module below this directory as a route.
pub const NEXT_PAGES_DIRECTORY: &str = "./pages";

/// The name of the manifest script that runs the compiler.
pub const RELAY_SCRIPT_NAME: &str = "relay";

/// The default invocation stored under the `relay` script.
pub const RELAY_SCRIPT: &str = "relay-compiler";

/// Prefixed to an existing `build` script so stale artifacts fail the build.
pub const VALIDATE_RELAY_ARTIFACTS_SCRIPT: &str = "relay-compiler --validate";

/// The top-level manifest section read by relay-compiler.
pub const RELAY_SECTION_NAME: &str = "relay";

/// Globs relay-compiler should never scan.
pub const RELAY_EXCLUDE_GLOBS: [&str; 3] = [
    "**/node_modules/**",
    "**/__mocks__/**",
    "**/__generated__/**",
];

/// The base name of the generated environment module.
pub const RELAY_ENVIRONMENT_BASENAME: &str = "RelayEnvironment";

/// The directory, inside the own package directory, holding bundled templates.
pub const ASSETS_DIRECTORY: &str = "assets";

/// Overrides the directory the bundled `assets/` are read from.
pub const OWN_PACKAGE_DIRECTORY_ENV: &str = "CREATE_RELAY_APP_HOME";

/// Set by npm, yarn and pnpm when they launch a binary.
pub const NPM_USER_AGENT_ENV: &str = "npm_config_user_agent";
