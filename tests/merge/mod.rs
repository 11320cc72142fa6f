mod merge_conflict;
mod merge_guards;
mod merge_three_way;
