use dedup_migrate_core::{Dialect, Direction, render_sql};

pub(crate) fn run(dialect: Dialect, direction: Direction) {
    print!("{}", render_sql(dialect, direction));
}
