// ThunderSTORM macro templates (pure string building)

use super::literal::{escape_string, number, option_value};
use crate::config::{AnalysisParams, RECONSTRUCTED_IMAGE_FILE, RESULTS_FILE};

/// Line printed by the probe macro; its presence in stdout proves the macro ran
pub const PROBE_MARKER: &str = "fiji-automator probe ok";

/// Build the analysis macro
///
/// `input` and `output_dir` must already use forward slashes.
pub fn render_analysis_macro(input: &str, output_dir: &str, params: &AnalysisParams) -> String {
    let input = escape_string(input);
    let results = escape_string(&format!("{}/{}", output_dir, RESULTS_FILE));
    let image = escape_string(&format!("{}/{}", output_dir, RECONSTRUCTED_IMAGE_FILE));
    let gain = number(params.gain);
    let offset = number(params.offset);
    let pixel_size = number(params.pixel_size);

    let mut m = format!(
        r#"// ThunderSTORM analysis macro (generated)
print("Starting ThunderSTORM analysis...");

open("{input}");
print("Opened input file: {input}");
if (nImages == 0) {{
    print("Error: No images are open!");
    exit();
}}

run("Camera setup", "offset={offset} isemgain=true gainem={gain} pixelsize={pixel_size}");
run("Run analysis",
    "filter=[{filter}] " +
    "detector=[Local maximum] " +
    "estimator=[{estimator}] " +
    "sigma={sigma} " +
    "fitradius={fitradius} " +
    "method=[Weighted Least squares] " +
    "camera.gain={gain} " +
    "camera.offset={offset} " +
    "camera.pixelsize={pixel_size}");
print("ThunderSTORM analysis completed.");

run("Export results",
    "filepath=[{results}] " +
    "fileformat=[CSV (comma separated)] " +
    "id=true frame=true x=true y=true sigma=true intensity=true offset=true " +
    "bkgstd=true uncertainty=true saveprotocol=true");
print("Results exported to: {results}");
"#,
        filter = option_value(&params.processing_method),
        estimator = option_value(&params.localization_method),
        sigma = number(params.sigma),
        fitradius = params.fitting_radius,
    );

    if params.create_reconstructed_image {
        m.push_str(&format!(
            r#"
run("Visualization",
    "imleft=0.0 imtop=0.0 imwidth=512.0 imheight=512.0 " +
    "renderer=[Averaged shifted histograms] " +
    "magnification=5.0 colorizez=false threed=false " +
    "shifts=2 repaint=50");
for (i = 1; i <= nImages; i++) {{
    selectImage(i);
    title = getTitle();
    if (indexOf(title, "Reconstructed") >= 0 || indexOf(title, "Visualization") >= 0) {{
        saveAs("Tiff", "{image}");
        print("Super-resolved image saved: {image}");
        break;
    }}
}}
"#
        ));
    }

    m.push_str(
        r#"
run("Close All");
print("Analysis complete. All windows closed.");
"#,
    );
    m
}

/// Minimal macro used to check that Fiji starts and runs macros
pub fn render_probe_macro() -> String {
    format!(
        "print(\"{}\");\nprint(\"ImageJ version: \" + getVersion());\n",
        PROBE_MARKER
    )
}
