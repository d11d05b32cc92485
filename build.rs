use shadow_rs::ShadowBuilder;

fn main() {
    // Build metadata for `--version`
    if let Err(e) = ShadowBuilder::builder().build() {
        panic!("Failed to generate build metadata: {e}");
    }
}
