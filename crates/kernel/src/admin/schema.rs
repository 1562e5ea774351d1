//! Table and column identifiers for the forum's user tables.

use sea_query::Iden;

#[derive(Iden, Clone, Copy)]
pub(crate) enum Users {
    Table,
    Uid,
    Username,
    Usergroup,
    Additionalgroups,
    Email,
    Website,
    Icq,
    Aim,
    Yahoo,
    Msn,
    Signature,
    Usertitle,
    Postnum,
    Regip,
    Regdate,
    Lastvisit,
    Allownotices,
}

#[derive(Iden, Clone, Copy)]
pub(crate) enum Userfields {
    Table,
    Ufid,
}

#[derive(Iden, Clone, Copy)]
pub(crate) enum Banned {
    Table,
    Uid,
    Oldgroup,
    Lifted,
}

#[derive(Iden, Clone, Copy)]
pub(crate) enum Posts {
    Table,
    Uid,
    Username,
    Edituid,
}

#[derive(Iden, Clone, Copy)]
pub(crate) enum Threads {
    Table,
    Uid,
    Username,
    Lastposter,
}

#[derive(Iden, Clone, Copy)]
pub(crate) enum Forums {
    Table,
    Lastposter,
}

#[derive(Iden, Clone, Copy)]
pub(crate) enum Privatemessages {
    Table,
    Uid,
    Toid,
    Fromid,
}

#[derive(Iden, Clone, Copy)]
pub(crate) enum Events {
    Table,
    Author,
}
