use anyhow::Result;

use crate::Context;

pub fn run(ctx: &Context, fields: &[String]) -> Result<()> {
    for field in fields {
        let key = binding::to_tree_key(field);
        if ctx.quiet {
            println!("{key}");
        } else {
            println!("{field} -> {key}");
        }
    }
    Ok(())
}
