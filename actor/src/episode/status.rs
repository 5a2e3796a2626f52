#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Done(Done),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Done {
    // the game reported a crash; the last transition has been learned as
    // terminal
    Crashed,
    // the tick ceiling was hit without a crash. nothing terminal is learned
    // here since the game itself never ended, the caller just stops asking
    TickLimit,
}
