use super::UpdateContext;

/// Fall one cell: into empty space, or through a lighter non-solid particle.
pub fn fall(ctx: &mut UpdateContext) -> bool {
    if ctx.already_changed() {
        return false;
    }
    let (x, below) = (ctx.xi(), ctx.yi() + 1);
    let Some(target) = ctx.grid.particle(x, below) else {
        return false;
    };

    let sinks = target.is_empty()
        || (!target.is_solid() && !target.changed_this_tick && ctx.current().density > target.density);
    sinks && ctx.move_to(x, below)
}
